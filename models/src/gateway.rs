use std::sync::Arc;
use std::time::Duration;

use doppelcheck_trust::TrustChain;
use doppelcheck_types::NormalizedSource;
use serde_json::{Map, Value};

use crate::envelope::{validate_output, ModelInputs, VerificationResult};
use crate::factory::ProviderFactory;
use crate::id::ModelId;
use crate::provider::ModelProvider;
use crate::ModelError;

/// Deadline applied when the caller gives none.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// One resolved model plus its call policy.
///
/// The identifier is parsed and the provider built up front, so a bad
/// identifier or missing credentials fail before any claim is processed.
pub struct ModelGateway {
    id: ModelId,
    provider: Arc<dyn ModelProvider>,
    default_timeout: Duration,
}

impl ModelGateway {
    pub fn new(id: ModelId, provider: Arc<dyn ModelProvider>, default_timeout: Duration) -> Self {
        Self {
            id,
            provider,
            default_timeout,
        }
    }

    pub fn from_identifier(
        identifier: &str,
        factory: &ProviderFactory,
        default_timeout: Duration,
    ) -> Result<Self, ModelError> {
        let id = ModelId::parse(identifier)?;
        let provider = factory.resolve(&id)?;
        tracing::info!(model = %id, "model gateway ready");
        Ok(Self::new(id, provider, default_timeout))
    }

    pub fn model_id(&self) -> &ModelId {
        &self.id
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Ask the model for a verdict on `claim`.
    ///
    /// Bounded by `timeout`, or the gateway default. A provider that misses the
    /// deadline yields `ProviderTimeout`, never a partial result.
    pub async fn verify(
        &self,
        claim: &str,
        sources: &[NormalizedSource],
        trust_chain: &TrustChain,
        context: Option<&Map<String, Value>>,
        timeout: Option<Duration>,
    ) -> Result<VerificationResult, ModelError> {
        let inputs = ModelInputs::new(claim, sources, trust_chain, context);
        let deadline = timeout.unwrap_or(self.default_timeout);

        let output = match tokio::time::timeout(deadline, self.provider.predict(&inputs)).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(model = %self.id, after_ms = deadline.as_millis() as u64, "provider timed out");
                return Err(ModelError::ProviderTimeout {
                    provider: self.id.to_string(),
                    after_ms: deadline.as_millis() as u64,
                });
            }
        };

        let result = validate_output(output)?;
        tracing::debug!(
            model = %self.id,
            verdict = %result.verification_result,
            confidence = result.confidence_score,
            "model verdict"
        );
        Ok(result)
    }
}
