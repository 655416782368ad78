use super::amount::{Frequency, format_dollars};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Which amount control is currently highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveChoice {
    Preset(Decimal),
    Custom,
}

/// The donor's current amount and frequency.
///
/// An amount of zero means "unset"; that is both the initial state and the
/// state any invalid input degrades to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DonationSelection {
    pub amount: Decimal,
    pub frequency: Frequency,
}

/// Tracks the amount selection from discrete UI choices.
///
/// None of the operations fail: out-of-catalog presets, non-numeric custom
/// input and amounts under the minimum all leave the selection unset.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountSelector {
    catalog: Vec<Decimal>,
    minimum: Decimal,
    selection: DonationSelection,
    active: Option<ActiveChoice>,
}

impl AmountSelector {
    pub fn new(catalog: Vec<Decimal>, minimum: Decimal) -> Self {
        Self {
            catalog,
            minimum,
            selection: DonationSelection::default(),
            active: None,
        }
    }

    pub fn catalog(&self) -> &[Decimal] {
        &self.catalog
    }

    pub fn selection(&self) -> DonationSelection {
        self.selection
    }

    pub fn active_choice(&self) -> Option<ActiveChoice> {
        self.active
    }

    /// Whether the custom amount field should be visible.
    pub fn custom_input_visible(&self) -> bool {
        self.active == Some(ActiveChoice::Custom)
    }

    pub fn select_preset(&mut self, amount: Decimal) {
        if self.catalog.contains(&amount) {
            self.selection.amount = amount;
            self.active = Some(ActiveChoice::Preset(amount));
        } else {
            self.selection.amount = Decimal::ZERO;
            self.active = None;
        }
    }

    /// Switches to the free-form amount field; the amount stays unset until
    /// something is typed.
    pub fn select_custom_mode(&mut self) {
        self.selection.amount = Decimal::ZERO;
        self.active = Some(ActiveChoice::Custom);
    }

    pub fn select_custom(&mut self, input: &str) {
        self.active = Some(ActiveChoice::Custom);
        self.selection.amount = match Decimal::from_str(input.trim()) {
            Ok(value) if value >= self.minimum && value > Decimal::ZERO => value,
            _ => Decimal::ZERO,
        };
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.selection.frequency = frequency;
    }

    pub fn is_submittable(&self) -> bool {
        self.selection.amount > Decimal::ZERO
    }

    pub fn display_amount(&self) -> String {
        format_dollars(self.selection.amount)
    }

    pub fn submit_label(&self) -> String {
        if self.is_submittable() {
            format!(
                "Donate {}{}",
                self.display_amount(),
                self.selection.frequency.label_suffix()
            )
        } else {
            "Select Amount".to_string()
        }
    }

    pub fn reset(&mut self) {
        self.selection = DonationSelection::default();
        self.active = None;
    }
}
