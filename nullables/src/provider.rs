//! Nullable model provider: scripted verdicts for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use doppelcheck_models::{ModelError, ModelInputs, ModelProvider, ProviderKind};
use serde_json::{json, Value};

/// A model provider that answers with a fixed reply.
///
/// Counts calls and keeps every input envelope it was given.
pub struct NullProvider {
    reply: Mutex<Result<Value, ModelError>>,
    delay: Mutex<Duration>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<ModelInputs>>,
}

impl NullProvider {
    pub fn new(reply: Value) -> Self {
        Self {
            reply: Mutex::new(Ok(reply)),
            delay: Mutex::new(Duration::ZERO),
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// `{"verification_result": "verified", "confidence_score": 0.95, "evidence_links": []}`
    pub fn verified() -> Self {
        Self::new(json!({
            "verification_result": "verified",
            "confidence_score": 0.95,
            "evidence_links": [],
        }))
    }

    /// Sleep this long before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = delay;
        self
    }

    /// Answer every later call with `error`.
    pub fn fail_with(&self, error: ModelError) {
        *self.reply.lock().unwrap() = Err(error);
    }

    pub fn set_reply(&self, reply: Value) {
        *self.reply.lock().unwrap() = Ok(reply);
    }

    /// Number of `predict` calls so far, including ones still sleeping.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<ModelInputs> {
        self.inputs.lock().unwrap().clone()
    }
}

impl Default for NullProvider {
    fn default() -> Self {
        Self::verified()
    }
}

#[async_trait]
impl ModelProvider for NullProvider {
    async fn predict(&self, inputs: &ModelInputs) -> Result<Value, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(inputs.clone());
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.reply.lock().unwrap().clone()
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doppelcheck_trust::TrustChain;

    #[tokio::test]
    async fn counts_calls_and_records_inputs() {
        let provider = NullProvider::verified();
        let inputs = ModelInputs::new("claim", &[], &TrustChain::new(), None);
        let out = provider.predict(&inputs).await.unwrap();
        assert_eq!(out["verification_result"], "verified");
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.inputs()[0].claim, "claim");
    }

    #[tokio::test]
    async fn scripted_failure() {
        let provider = NullProvider::verified();
        provider.fail_with(ModelError::ProviderUnavailable("down".into()));
        let inputs = ModelInputs::new("claim", &[], &TrustChain::new(), None);
        assert_eq!(
            provider.predict(&inputs).await,
            Err(ModelError::ProviderUnavailable("down".into()))
        );
    }
}
