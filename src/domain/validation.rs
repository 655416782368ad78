use super::amount::format_dollars;
use crate::config::AmountLimits;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountValidation {
    Valid,
    Invalid { reason: String },
}

impl AmountValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, AmountValidation::Valid)
    }
}

/// Checks an amount against the donation limits.
///
/// Amounts over the maximum are rejected rather than capped; the reason points
/// the donor at `contact_phone` instead.
pub fn validate_amount(amount: Decimal, limits: &AmountLimits, contact_phone: &str) -> AmountValidation {
    if amount <= Decimal::ZERO {
        return AmountValidation::Invalid {
            reason: "Please enter a valid donation amount.".to_string(),
        };
    }
    if amount < limits.minimum {
        return AmountValidation::Invalid {
            reason: format!("Minimum donation amount is {}.", format_dollars(limits.minimum)),
        };
    }
    if amount > limits.maximum {
        return AmountValidation::Invalid {
            reason: format!(
                "For donations over {}, please contact us directly at {}.",
                format_thousands(limits.maximum),
                contact_phone
            ),
        };
    }
    AmountValidation::Valid
}

/// `$10,000` style formatting for the whole-dollar part of an amount.
fn format_thousands(amount: Decimal) -> String {
    let whole = amount.trunc().normalize().to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

pub fn is_valid_email(email: &str) -> bool {
    let re = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    });
    re.is_match(email)
}
