//! In-process inference.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::envelope::ModelInputs;
use crate::id::ProviderKind;
use crate::provider::ModelProvider;
use crate::ModelError;

/// A model runtime loaded into this process.
#[async_trait]
pub trait LocalEngine: Send + Sync {
    async fn infer(&self, model: &str, inputs: &ModelInputs) -> Result<Value, ModelError>;
}

/// Settings for the built-in [`StaticEngine`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(default = "default_verdict")]
    pub verdict: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_verdict() -> String {
    "verified".to_string()
}

fn default_confidence() -> f64 {
    0.95
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            verdict: default_verdict(),
            confidence: default_confidence(),
        }
    }
}

/// Returns a fixed verdict for every claim.
///
/// Stands in for a real runtime so the pipeline runs end to end without one.
#[derive(Clone, Debug, Default)]
pub struct StaticEngine {
    config: LocalConfig,
}

impl StaticEngine {
    pub fn new(config: LocalConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl LocalEngine for StaticEngine {
    async fn infer(&self, model: &str, inputs: &ModelInputs) -> Result<Value, ModelError> {
        tracing::debug!(model, sources = inputs.sources.len(), "static engine inference");
        Ok(json!({
            "verification_result": self.config.verdict,
            "confidence_score": self.config.confidence,
            "evidence_links": [],
        }))
    }
}

/// Provider for a model served by a [`LocalEngine`].
pub struct LocalProvider {
    name: String,
    engine: Arc<dyn LocalEngine>,
}

impl LocalProvider {
    pub fn new(name: impl Into<String>, engine: Arc<dyn LocalEngine>) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }
}

#[async_trait]
impl ModelProvider for LocalProvider {
    async fn predict(&self, inputs: &ModelInputs) -> Result<Value, ModelError> {
        self.engine.infer(&self.name, inputs).await
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }

    fn name(&self) -> &str {
        &self.name
    }
}
