use crate::config::SdkConfig;
use crate::domain::ports::{CardProvider, ProcessingBackend, TokenResult};
use crate::domain::record::{ChargeRequest, PaymentOutcome};
use crate::error::{DonationError, Result};
use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn base36_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Handle used to decide what the next card tokenizations return.
///
/// Shared with a `ScriptedCardProvider`; stands in for the donor typing card
/// details into the widget.
#[derive(Debug, Default, Clone)]
pub struct CardScript {
    queue: Arc<Mutex<VecDeque<TokenResult>>>,
}

impl CardScript {
    pub async fn push(&self, result: TokenResult) {
        self.queue.lock().await.push_back(result);
    }

    pub async fn pending(&self) -> usize {
        self.queue.lock().await.len()
    }
}

/// Sandbox card widget. Tokenizes to whatever the script says next, or to a
/// fresh nonce when the script is empty.
#[derive(Debug)]
pub struct ScriptedCardProvider {
    script: CardScript,
    fail_attach: bool,
    attached_to: Option<String>,
}

impl ScriptedCardProvider {
    pub fn new() -> (Self, CardScript) {
        let script = CardScript::default();
        let provider = Self {
            script: script.clone(),
            fail_attach: false,
            attached_to: None,
        };
        (provider, script)
    }

    /// A widget that loads but cannot be mounted into the page.
    pub fn failing_attach() -> (Self, CardScript) {
        let (mut provider, script) = Self::new();
        provider.fail_attach = true;
        (provider, script)
    }
}

#[async_trait]
impl CardProvider for ScriptedCardProvider {
    async fn initialize(&mut self, config: &SdkConfig) -> Result<()> {
        if config.application_id.trim().is_empty() {
            return Err(DonationError::AdapterUnavailable(
                "missing application id".to_string(),
            ));
        }
        tracing::debug!(application_id = %config.application_id, "Card widget created");
        Ok(())
    }

    async fn attach(&mut self, container: &str) -> Result<()> {
        if self.fail_attach {
            return Err(DonationError::AdapterUnavailable(format!(
                "container {container} not found"
            )));
        }
        self.attached_to = Some(container.to_string());
        Ok(())
    }

    async fn tokenize(&self) -> Result<TokenResult> {
        if self.attached_to.is_none() {
            return Err(DonationError::NotInitialized);
        }
        let next = self.script.queue.lock().await.pop_front();
        Ok(next.unwrap_or_else(|| {
            let nonce: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(24)
                .map(char::from)
                .collect();
            TokenResult::ok(format!("cnon:{nonce}"))
        }))
    }
}

/// Provider used when the payment SDK never loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct MissingSdk;

#[async_trait]
impl CardProvider for MissingSdk {
    async fn initialize(&mut self, _config: &SdkConfig) -> Result<()> {
        Err(DonationError::AdapterUnavailable(
            "payment SDK not loaded".to_string(),
        ))
    }

    async fn attach(&mut self, _container: &str) -> Result<()> {
        Err(DonationError::AdapterUnavailable(
            "payment SDK not loaded".to_string(),
        ))
    }

    async fn tokenize(&self) -> Result<TokenResult> {
        Err(DonationError::NotInitialized)
    }
}

/// Local stand-in for the processing server.
///
/// Waits a fixed delay and answers with a synthetic transaction id. No money
/// moves. A real backend must be an authenticated network call.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
    failure: Option<String>,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    /// A backend that reports every charge as failed with `message`.
    pub fn failing(delay: Duration, message: impl Into<String>) -> Self {
        Self {
            delay,
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl ProcessingBackend for SimulatedBackend {
    async fn process(&self, request: ChargeRequest) -> Result<PaymentOutcome> {
        tracing::info!(
            amount = %request.amount,
            frequency = %request.frequency,
            anonymous = request.anonymous,
            newsletter = request.newsletter,
            "Processing payment"
        );
        tokio::time::sleep(self.delay).await;

        if let Some(message) = &self.failure {
            return Ok(PaymentOutcome::failed(message.clone()));
        }
        Ok(PaymentOutcome::succeeded(format!("txn_{}", base36_suffix(9))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::Frequency;
    use crate::domain::ports::TokenStatus;
    use rust_decimal_macros::dec;

    fn request() -> ChargeRequest {
        ChargeRequest {
            token: "cnon:test".to_string(),
            amount: dec!(25),
            frequency: Frequency::OneTime,
            donor: String::new(),
            email: String::new(),
            anonymous: true,
            newsletter: false,
        }
    }

    #[tokio::test]
    async fn test_backend_transaction_id_shape() {
        let backend = SimulatedBackend::new(Duration::ZERO);
        let outcome = backend.process(request()).await.unwrap();
        let id = outcome.transaction_id.unwrap();

        assert!(outcome.success);
        assert_eq!(id.len(), 13);
        assert!(id.starts_with("txn_"));
        assert!(id[4..].bytes().all(|b| BASE36.contains(&b)));
    }

    #[tokio::test]
    async fn test_backend_failure() {
        let backend = SimulatedBackend::failing(Duration::ZERO, "declined");
        let outcome = backend.process(request()).await.unwrap();
        assert_eq!(outcome, PaymentOutcome::failed("declined"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_waits_for_delay() {
        let backend = SimulatedBackend::new(Duration::from_secs(2));
        let started = tokio::time::Instant::now();
        backend.process(request()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_scripted_provider_consumes_queue_in_order() {
        let (mut card, script) = ScriptedCardProvider::new();
        card.attach("#card-container").await.unwrap();
        script.push(TokenResult::rejected(Vec::new())).await;

        assert_eq!(card.tokenize().await.unwrap().status, TokenStatus::Invalid);
        let fallback = card.tokenize().await.unwrap();
        assert_eq!(fallback.status, TokenStatus::Ok);
        assert!(fallback.token.unwrap().starts_with("cnon:"));
    }

    #[tokio::test]
    async fn test_tokenize_requires_attach() {
        let (card, _script) = ScriptedCardProvider::new();
        assert!(matches!(
            card.tokenize().await,
            Err(DonationError::NotInitialized)
        ));
    }
}
