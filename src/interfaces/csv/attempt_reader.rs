use crate::domain::amount::Frequency;
use crate::domain::ports::{FieldError, TokenResult};
use crate::domain::record::DonorDetails;
use crate::error::{DonationError, Result};
use serde::Deserialize;
use std::io::Read;

/// One scripted donor interaction: what they picked, what they typed, and how
/// the card widget responds.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct DonationAttempt {
    /// Raw amount as entered; preset values select the matching preset.
    pub amount: String,
    pub frequency: Option<Frequency>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub anonymous: Option<bool>,
    pub newsletter: Option<bool>,
    /// Empty or `ok` to tokenize successfully, otherwise `field:detail` pairs
    /// separated by `;`.
    pub card: Option<String>,
}

impl DonationAttempt {
    pub fn donor(&self) -> DonorDetails {
        DonorDetails {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            anonymous: self.anonymous.unwrap_or(false),
            subscribe_newsletter: self.newsletter.unwrap_or(false),
        }
    }

    /// The tokenization result to script for this attempt, if it is not a
    /// plain success.
    pub fn scripted_token(&self) -> Option<TokenResult> {
        let card = self.card.as_deref().map(str::trim).unwrap_or("");
        if card.is_empty() || card.eq_ignore_ascii_case("ok") {
            return None;
        }

        let errors = card
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once(':') {
                Some((field, detail)) => FieldError {
                    field: field.trim().to_string(),
                    detail: detail.trim().to_string(),
                },
                None => FieldError {
                    field: "card".to_string(),
                    detail: entry.to_string(),
                },
            })
            .collect();
        Some(TokenResult::rejected(errors))
    }
}

/// Reads donation attempts from a CSV source.
pub struct AttemptReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AttemptReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes attempts, one `Result` per row.
    pub fn attempts(self) -> impl Iterator<Item = Result<DonationAttempt>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(DonationError::from))
    }
}
