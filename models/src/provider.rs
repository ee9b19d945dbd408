//! Provider capability.

use async_trait::async_trait;
use serde_json::Value;

use crate::envelope::ModelInputs;
use crate::id::ProviderKind;
use crate::ModelError;

/// Runs one prediction. Local and cloud variants differ only in transport.
///
/// Returns the raw response; shape validation happens in the gateway. Any
/// retry policy belongs inside the implementation.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn predict(&self, inputs: &ModelInputs) -> Result<Value, ModelError>;

    fn kind(&self) -> ProviderKind;

    /// Model name within the provider.
    fn name(&self) -> &str;
}
