use crate::config::{AmountLimits, SdkConfig};
use crate::domain::ports::{CardProviderBox, ProcessingBackendBox, TokenStatus};
use crate::domain::record::{ChargeRequest, DonationRecord, PaymentOutcome};
use crate::domain::validation::{AmountValidation, validate_amount};
use crate::error::{DonationError, Result};
use rust_decimal::Decimal;

/// Lifecycle of the payment adapter. `Fallback` is terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdapterState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Fallback,
}

/// Isolates the tokenization SDK and the processing backend behind three
/// operations: `initialize`, `validate_amount` and `process_donation`.
///
/// There is no busy guard. While `Ready`, concurrent submissions are the
/// caller's problem.
pub struct PaymentAdapter {
    card: CardProviderBox,
    backend: ProcessingBackendBox,
    sdk: SdkConfig,
    limits: AmountLimits,
    contact_phone: String,
    state: AdapterState,
}

impl PaymentAdapter {
    pub fn new(
        card: CardProviderBox,
        backend: ProcessingBackendBox,
        sdk: SdkConfig,
        limits: AmountLimits,
        contact_phone: impl Into<String>,
    ) -> Self {
        Self {
            card,
            backend,
            sdk,
            limits,
            contact_phone: contact_phone.into(),
            state: AdapterState::Uninitialized,
        }
    }

    pub fn state(&self) -> AdapterState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == AdapterState::Ready
    }

    /// Prepares the card widget. Only the first call does any work; later
    /// calls return the state it settled in.
    pub async fn initialize(&mut self) -> AdapterState {
        if self.state != AdapterState::Uninitialized {
            return self.state;
        }
        self.state = AdapterState::Initializing;

        let result = match self.card.initialize(&self.sdk).await {
            Ok(()) => self.card.attach(&self.sdk.container).await,
            Err(e) => Err(e),
        };

        self.state = match result {
            Ok(()) => {
                tracing::info!(
                    environment = ?self.sdk.environment,
                    container = %self.sdk.container,
                    "Payment form initialized"
                );
                AdapterState::Ready
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize payment form, switching to fallback");
                AdapterState::Fallback
            }
        };
        self.state
    }

    pub fn validate_amount(&self, amount: Decimal) -> AmountValidation {
        validate_amount(amount, &self.limits, &self.contact_phone)
    }

    /// Tokenizes the captured card details and, only if that succeeds, charges
    /// the token.
    pub async fn process_donation(&self, record: DonationRecord) -> Result<PaymentOutcome> {
        if !self.is_ready() {
            return Err(DonationError::NotInitialized);
        }

        let token_result = self.card.tokenize().await?;
        let token = match (token_result.status, token_result.token) {
            (TokenStatus::Ok, Some(token)) => token,
            _ => {
                let details: Vec<&str> = token_result
                    .errors
                    .iter()
                    .map(|e| e.detail.as_str())
                    .collect();
                let message = format!("Payment processing failed. {}", details.join(" "));
                tracing::warn!(errors = token_result.errors.len(), "Tokenization rejected");
                return Err(DonationError::Tokenization(message.trim_end().to_string()));
            }
        };

        tracing::debug!(amount = %record.amount, frequency = %record.frequency, "Submitting charge");
        self.backend.process(ChargeRequest::new(token, record)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DonationConfig;
    use crate::domain::amount::Frequency;
    use crate::domain::ports::{FieldError, TokenResult};
    use crate::domain::record::{DonorDetails, DonationRecord};
    use crate::domain::selection::DonationSelection;
    use crate::infrastructure::simulated::{MissingSdk, ScriptedCardProvider, SimulatedBackend};
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn adapter_with(card: CardProviderBox, backend: SimulatedBackend) -> PaymentAdapter {
        let config = DonationConfig::default();
        PaymentAdapter::new(
            card,
            Box::new(backend),
            config.sdk,
            config.limits,
            config.contact.phone,
        )
    }

    fn record() -> DonationRecord {
        DonationRecord::new(
            DonationSelection {
                amount: dec!(50),
                frequency: Frequency::Monthly,
            },
            &DonorDetails::default(),
        )
    }

    #[tokio::test]
    async fn test_initialize_reaches_ready() {
        let (card, _script) = ScriptedCardProvider::new();
        let mut adapter = adapter_with(Box::new(card), SimulatedBackend::new(Duration::ZERO));

        assert_eq!(adapter.state(), AdapterState::Uninitialized);
        assert_eq!(adapter.initialize().await, AdapterState::Ready);
    }

    #[tokio::test]
    async fn test_missing_sdk_falls_back_for_good() {
        let mut adapter = adapter_with(Box::new(MissingSdk), SimulatedBackend::new(Duration::ZERO));

        assert_eq!(adapter.initialize().await, AdapterState::Fallback);
        assert_eq!(adapter.initialize().await, AdapterState::Fallback);
    }

    #[tokio::test]
    async fn test_attach_failure_falls_back() {
        let (card, _script) = ScriptedCardProvider::failing_attach();
        let mut adapter = adapter_with(Box::new(card), SimulatedBackend::new(Duration::ZERO));

        assert_eq!(adapter.initialize().await, AdapterState::Fallback);
    }

    #[tokio::test]
    async fn test_process_before_initialize_skips_tokenization() {
        let (card, script) = ScriptedCardProvider::new();
        script.push(TokenResult::ok("cnon:first")).await;
        let adapter = adapter_with(Box::new(card), SimulatedBackend::new(Duration::ZERO));

        let result = adapter.process_donation(record()).await;
        assert!(matches!(result, Err(DonationError::NotInitialized)));
        assert_eq!(script.pending().await, 1);
    }

    #[tokio::test]
    async fn test_tokenization_errors_are_aggregated() {
        let (card, script) = ScriptedCardProvider::new();
        let mut adapter = adapter_with(Box::new(card), SimulatedBackend::new(Duration::ZERO));
        adapter.initialize().await;

        script
            .push(TokenResult::rejected(vec![
                FieldError {
                    field: "cardNumber".to_string(),
                    detail: "Card number is invalid.".to_string(),
                },
                FieldError {
                    field: "cvv".to_string(),
                    detail: "CVV is required.".to_string(),
                },
            ]))
            .await;

        match adapter.process_donation(record()).await {
            Err(DonationError::Tokenization(msg)) => assert_eq!(
                msg,
                "Payment processing failed. Card number is invalid. CVV is required."
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ready_allows_repeated_donations() {
        let (card, _script) = ScriptedCardProvider::new();
        let mut adapter = adapter_with(Box::new(card), SimulatedBackend::new(Duration::ZERO));
        adapter.initialize().await;

        let first = adapter.process_donation(record()).await.unwrap();
        let second = adapter.process_donation(record()).await.unwrap();
        assert!(first.success && second.success);
        assert_ne!(first.transaction_id, second.transaction_id);
    }

    #[tokio::test]
    async fn test_validate_amount_uses_limits() {
        let (card, _script) = ScriptedCardProvider::new();
        let adapter = adapter_with(Box::new(card), SimulatedBackend::new(Duration::ZERO));
        assert!(adapter.validate_amount(dec!(5)).is_valid());
        assert!(!adapter.validate_amount(dec!(10001)).is_valid());
    }
}
