//! Session configuration.
//!
//! Everything the donation flow needs to know about the organization and the
//! payment provider lives here. Defaults match the production site; a JSON file
//! with any subset of the fields can override them.

use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DonationConfig {
    pub limits: AmountLimits,
    /// Amounts offered as one-click presets.
    pub presets: Vec<Decimal>,
    pub sdk: SdkConfig,
    pub contact: ContactDetails,
    /// Round-trip delay of the simulated processing backend, in milliseconds.
    pub processing_delay_ms: u64,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            limits: AmountLimits::default(),
            presets: vec![dec!(25), dec!(50), dec!(100), dec!(250), dec!(500)],
            sdk: SdkConfig::default(),
            contact: ContactDetails::default(),
            processing_delay_ms: 2000,
        }
    }
}

impl DonationConfig {
    /// Loads a config from a JSON file. Missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmountLimits {
    pub minimum: Decimal,
    pub maximum: Decimal,
}

impl Default for AmountLimits {
    fn default() -> Self {
        Self {
            minimum: dec!(5),
            maximum: dec!(10000),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SdkEnvironment {
    #[default]
    Sandbox,
    Production,
}

/// Settings handed to the card provider at initialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SdkConfig {
    pub application_id: String,
    pub environment: SdkEnvironment,
    /// Selector of the element the card widget attaches to.
    pub container: String,
    pub card_style: CardStyle,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            application_id: "sandbox-sq0idb-your-app-id-here".to_string(),
            environment: SdkEnvironment::Sandbox,
            container: "#card-container".to_string(),
            card_style: CardStyle::default(),
        }
    }
}

/// Style rules for the embedded card widget, keyed by selector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CardStyle(pub BTreeMap<String, BTreeMap<String, String>>);

impl Default for CardStyle {
    fn default() -> Self {
        let rules: [(&str, &[(&str, &str)]); 7] = [
            (
                ".input-container",
                &[("borderColor", "#e5e7eb"), ("borderRadius", "8px")],
            ),
            (".input-container.is-focus", &[("borderColor", "#2563eb")]),
            (".input-container.is-error", &[("borderColor", "#ef4444")]),
            (".message-text", &[("color", "#6b7280")]),
            (".message-icon", &[("color", "#6b7280")]),
            (".message-text.is-error", &[("color", "#ef4444")]),
            (".message-icon.is-error", &[("color", "#ef4444")]),
        ];
        Self(
            rules
                .iter()
                .map(|(selector, props)| {
                    let props = props
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect();
                    (selector.to_string(), props)
                })
                .collect(),
        )
    }
}

/// Offline donation channels, shown when online payment is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactDetails {
    pub organization: String,
    pub mailing_address: String,
    pub phone: String,
    pub phone_hours: String,
    pub donations_email: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            organization: "EvoAFuture Private Foundation".to_string(),
            mailing_address: "123 Community Street, Hope City, HC 12345".to_string(),
            phone: "(555) 123-4567".to_string(),
            phone_hours: "Monday-Friday, 9:00 AM - 6:00 PM EST".to_string(),
            donations_email: "donations@evoafuture.org".to_string(),
        }
    }
}

impl ContactDetails {
    /// Offline alternatives, one line per channel: mail, phone, bank transfer.
    pub fn fallback_instructions(&self) -> Vec<String> {
        vec![
            format!(
                "Mail a Check: make checks payable to \"{}\", mail to: {}",
                self.organization, self.mailing_address
            ),
            format!(
                "Call to Donate: phone {}, hours: {}",
                self.phone, self.phone_hours
            ),
            format!(
                "Bank Transfer: contact us for wire transfer details at {}",
                self.donations_email
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_instructions_cover_all_channels() {
        let lines = ContactDetails::default().fallback_instructions();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Mail a Check"));
        assert!(lines[0].contains("123 Community Street"));
        assert!(lines[1].contains("(555) 123-4567"));
        assert!(lines[2].contains("donations@evoafuture.org"));
    }

    #[test]
    fn test_default_limits() {
        let config = DonationConfig::default();
        assert_eq!(config.limits.minimum, dec!(5));
        assert_eq!(config.limits.maximum, dec!(10000));
        assert_eq!(config.processing_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DonationConfig::from_json(
            r#"{"processing_delay_ms": 0, "sdk": {"environment": "production"}}"#,
        )
        .unwrap();

        assert_eq!(config.processing_delay_ms, 0);
        assert_eq!(config.sdk.environment, SdkEnvironment::Production);
        assert_eq!(config.sdk.container, "#card-container");
        assert_eq!(config.presets.len(), 5);
        assert_eq!(config.contact.phone, "(555) 123-4567");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = DonationConfig::from_json("{not json");
        assert!(matches!(
            result,
            Err(crate::error::DonationError::ConfigError(_))
        ));
    }

    #[test]
    fn test_card_style_defaults() {
        let style = CardStyle::default();
        assert_eq!(style.0.len(), 7);
        assert_eq!(style.0[".input-container"]["borderRadius"], "8px");
    }
}
