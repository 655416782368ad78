use super::notification::Notification;
use super::record::{ChargeRequest, PaymentOutcome};
use super::selection::ActiveChoice;
use crate::config::{ContactDetails, SdkConfig};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    Ok,
    Invalid,
    Error,
}

/// What the card widget reports after a tokenize attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResult {
    pub status: TokenStatus,
    pub token: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl TokenResult {
    pub fn ok(token: impl Into<String>) -> Self {
        Self {
            status: TokenStatus::Ok,
            token: Some(token.into()),
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<FieldError>) -> Self {
        Self {
            status: TokenStatus::Invalid,
            token: None,
            errors,
        }
    }
}

/// The embedded card-input widget of a payment provider.
///
/// Any provider (real SDK binding, test double, missing SDK) plugs in here.
#[async_trait]
pub trait CardProvider: Send + Sync {
    async fn initialize(&mut self, config: &SdkConfig) -> Result<()>;
    async fn attach(&mut self, container: &str) -> Result<()>;
    async fn tokenize(&self) -> Result<TokenResult>;
}

/// Server side of a donation: charges a token.
#[async_trait]
pub trait ProcessingBackend: Send + Sync {
    async fn process(&self, request: ChargeRequest) -> Result<PaymentOutcome>;
}

/// Rendering capabilities the donation session needs from the page.
pub trait PaymentSurface {
    fn show_amount(&mut self, display: &str);
    fn show_submit(&mut self, label: &str, enabled: bool);
    fn show_busy(&mut self);
    fn show_custom_input(&mut self, visible: bool);
    fn highlight(&mut self, choice: Option<ActiveChoice>);
    fn notify(&mut self, notification: Notification);
    /// Replaces the card form with offline donation instructions.
    fn show_fallback(&mut self, contact: &ContactDetails);
}

pub type CardProviderBox = Box<dyn CardProvider>;
pub type ProcessingBackendBox = Box<dyn ProcessingBackend>;
