use super::amount::Frequency;
use super::selection::DonationSelection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Donor-entered form fields other than the amount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DonorDetails {
    pub name: String,
    pub email: String,
    pub anonymous: bool,
    pub subscribe_newsletter: bool,
}

/// A single submission attempt, built at submit time and handed to the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationRecord {
    pub amount: Decimal,
    pub frequency: Frequency,
    pub donor_name: String,
    pub donor_email: String,
    pub anonymous: bool,
    pub subscribe_newsletter: bool,
}

impl DonationRecord {
    pub fn new(selection: DonationSelection, donor: &DonorDetails) -> Self {
        Self {
            amount: selection.amount,
            frequency: selection.frequency,
            donor_name: donor.name.trim().to_string(),
            donor_email: donor.email.trim().to_string(),
            anonymous: donor.anonymous,
            subscribe_newsletter: donor.subscribe_newsletter,
        }
    }
}

/// Result of a processing call, consumed once by the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PaymentOutcome {
    pub fn succeeded(transaction_id: impl Into<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.into()),
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            error_message: Some(message.into()),
        }
    }
}

/// Body sent to the processing backend. Carries the single-use card token,
/// never raw card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeRequest {
    pub token: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub donor: String,
    pub email: String,
    pub anonymous: bool,
    pub newsletter: bool,
}

impl ChargeRequest {
    pub fn new(token: String, record: DonationRecord) -> Self {
        Self {
            token,
            amount: record.amount,
            frequency: record.frequency,
            donor: record.donor_name,
            email: record.donor_email,
            anonymous: record.anonymous,
            newsletter: record.subscribe_newsletter,
        }
    }
}
