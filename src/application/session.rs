use super::adapter::{AdapterState, PaymentAdapter};
use crate::config::{ContactDetails, DonationConfig};
use crate::domain::amount::{Frequency, format_dollars};
use crate::domain::notification::Notification;
use crate::domain::ports::{CardProviderBox, PaymentSurface, ProcessingBackendBox};
use crate::domain::record::{DonationRecord, DonorDetails};
use crate::domain::selection::{AmountSelector, DonationSelection};
use crate::domain::validation::AmountValidation;
use crate::error::DonationError;
use rust_decimal::Decimal;

const SELECT_AMOUNT: &str = "Please select a donation amount.";
const UNAVAILABLE: &str =
    "Payment processing unavailable. Please use alternative payment methods below.";
const GENERIC_FAILURE: &str =
    "Payment failed. Please try again or use alternative payment methods.";

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Nothing submittable was selected.
    Rejected,
    /// The adapter never became ready.
    Unavailable,
    /// Client-side amount validation failed; the adapter was not contacted.
    Invalid { reason: String },
    Completed { transaction_id: Option<String> },
    /// The card details were rejected; the selection is kept for a retry.
    TokenizationFailed { message: String },
    ProcessingFailed { message: String },
}

impl SubmissionResult {
    pub fn status(&self) -> &'static str {
        match self {
            SubmissionResult::Rejected => "rejected",
            SubmissionResult::Unavailable => "unavailable",
            SubmissionResult::Invalid { .. } => "invalid",
            SubmissionResult::Completed { .. } => "completed",
            SubmissionResult::TokenizationFailed { .. } => "card_rejected",
            SubmissionResult::ProcessingFailed { .. } => "failed",
        }
    }
}

/// One donor's donation session: selection, form fields, payment adapter and
/// the surface everything is rendered on.
pub struct DonationSession<S: PaymentSurface> {
    selector: AmountSelector,
    donor: DonorDetails,
    adapter: PaymentAdapter,
    contact: ContactDetails,
    surface: S,
    fallback_shown: bool,
}

impl<S: PaymentSurface> DonationSession<S> {
    pub fn new(
        config: &DonationConfig,
        card: CardProviderBox,
        backend: ProcessingBackendBox,
        surface: S,
    ) -> Self {
        let adapter = PaymentAdapter::new(
            card,
            backend,
            config.sdk.clone(),
            config.limits,
            config.contact.phone.clone(),
        );
        Self {
            selector: AmountSelector::new(config.presets.clone(), config.limits.minimum),
            donor: DonorDetails::default(),
            adapter,
            contact: config.contact.clone(),
            surface,
            fallback_shown: false,
        }
    }

    pub fn selection(&self) -> DonationSelection {
        self.selector.selection()
    }

    pub fn selector(&self) -> &AmountSelector {
        &self.selector
    }

    pub fn donor(&self) -> &DonorDetails {
        &self.donor
    }

    pub fn adapter_state(&self) -> AdapterState {
        self.adapter.state()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Submit is only offered once the card form is ready and an amount is
    /// selected.
    pub fn submit_enabled(&self) -> bool {
        self.adapter.is_ready() && self.selector.is_submittable()
    }

    /// Brings up the payment form. On failure the card form is replaced with
    /// offline instructions for the rest of the session.
    pub async fn initialize(&mut self) -> AdapterState {
        let state = self.adapter.initialize().await;
        if state == AdapterState::Fallback && !self.fallback_shown {
            self.surface.show_fallback(&self.contact);
            self.fallback_shown = true;
        }
        self.render_selection();
        state
    }

    pub fn select_preset(&mut self, amount: Decimal) {
        self.selector.select_preset(amount);
        self.render_selection();
    }

    pub fn select_custom_mode(&mut self) {
        self.selector.select_custom_mode();
        self.render_selection();
    }

    pub fn enter_custom_amount(&mut self, input: &str) {
        self.selector.select_custom(input);
        self.render_selection();
    }

    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.selector.set_frequency(frequency);
        self.render_selection();
    }

    pub fn set_donor(&mut self, donor: DonorDetails) {
        self.donor = donor;
    }

    pub fn reset_donation_form(&mut self) {
        self.selector.reset();
        self.donor = DonorDetails::default();
        self.render_selection();
    }

    /// Runs one submission. The submit control is restored on every path
    /// that disabled it.
    pub async fn submit(&mut self) -> SubmissionResult {
        if !self.selector.is_submittable() {
            self.surface.notify(Notification::error(SELECT_AMOUNT));
            return SubmissionResult::Rejected;
        }

        self.surface.show_busy();
        let result = self.run_submission().await;
        let (label, enabled) = (self.selector.submit_label(), self.submit_enabled());
        self.surface.show_submit(&label, enabled);
        result
    }

    async fn run_submission(&mut self) -> SubmissionResult {
        if !self.adapter.is_ready() {
            self.surface
                .notify(Notification::error(UNAVAILABLE).lasting(Notification::DONATION));
            return SubmissionResult::Unavailable;
        }

        let selection = self.selector.selection();
        if let AmountValidation::Invalid { reason } = self.adapter.validate_amount(selection.amount) {
            self.surface.notify(Notification::error(reason.clone()));
            return SubmissionResult::Invalid { reason };
        }

        let record = DonationRecord::new(selection, &self.donor);
        match self.adapter.process_donation(record.clone()).await {
            Ok(outcome) if outcome.success => {
                let message = thank_you_message(&record, outcome.transaction_id.as_deref());
                tracing::info!(
                    amount = %record.amount,
                    frequency = %record.frequency,
                    transaction_id = ?outcome.transaction_id,
                    "Donation completed"
                );
                self.surface
                    .notify(Notification::success(message).lasting(Notification::THANK_YOU));
                self.reset_donation_form();
                SubmissionResult::Completed {
                    transaction_id: outcome.transaction_id,
                }
            }
            Ok(outcome) => {
                let message = outcome
                    .error_message
                    .unwrap_or_else(|| "Payment processing failed".to_string());
                tracing::error!(error = %message, "Payment declined by backend");
                self.surface
                    .notify(Notification::error(GENERIC_FAILURE).lasting(Notification::DONATION));
                SubmissionResult::ProcessingFailed { message }
            }
            Err(DonationError::Tokenization(message)) => {
                self.surface
                    .notify(Notification::error(message.clone()).lasting(Notification::DONATION));
                SubmissionResult::TokenizationFailed { message }
            }
            Err(e) => {
                tracing::error!(error = %e, "Payment error");
                self.surface
                    .notify(Notification::error(GENERIC_FAILURE).lasting(Notification::DONATION));
                SubmissionResult::ProcessingFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    fn render_selection(&mut self) {
        self.surface.show_amount(&self.selector.display_amount());
        self.surface.highlight(self.selector.active_choice());
        self.surface
            .show_custom_input(self.selector.custom_input_visible());
        let enabled = self.submit_enabled();
        self.surface
            .show_submit(&self.selector.submit_label(), enabled);
    }
}

fn thank_you_message(record: &DonationRecord, transaction_id: Option<&str>) -> String {
    let amount = format_dollars(record.amount);
    let mut message = if record.anonymous || record.donor_name.is_empty() {
        format!(
            "Thank you for your generous {} donation of {}!",
            record.frequency, amount
        )
    } else {
        format!(
            "Thank you, {}, for your generous {} donation of {}!",
            record.donor_name, record.frequency, amount
        )
    };
    message.push_str(" You will receive a tax receipt via email shortly.");
    if let Some(id) = transaction_id {
        message.push_str(&format!(" Transaction ID: {id}"));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::DonationSelection;
    use rust_decimal_macros::dec;

    fn record(name: &str, anonymous: bool) -> DonationRecord {
        DonationRecord::new(
            DonationSelection {
                amount: dec!(50),
                frequency: Frequency::Monthly,
            },
            &DonorDetails {
                name: name.to_string(),
                email: "donor@example.org".to_string(),
                anonymous,
                subscribe_newsletter: false,
            },
        )
    }

    #[test]
    fn test_thank_you_personalized() {
        assert_eq!(
            thank_you_message(&record("Ada", false), Some("txn_abc123def")),
            "Thank you, Ada, for your generous monthly donation of $50! You will receive a tax receipt via email shortly. Transaction ID: txn_abc123def"
        );
    }

    #[test]
    fn test_thank_you_anonymous_or_nameless() {
        let expected = "Thank you for your generous monthly donation of $50! You will receive a tax receipt via email shortly.";
        assert_eq!(thank_you_message(&record("Ada", true), None), expected);
        assert_eq!(thank_you_message(&record("  ", false), None), expected);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(SubmissionResult::Rejected.status(), "rejected");
        assert_eq!(
            SubmissionResult::TokenizationFailed {
                message: String::new()
            }
            .status(),
            "card_rejected"
        );
    }
}
