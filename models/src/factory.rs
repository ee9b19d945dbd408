use std::sync::Arc;

use crate::cloud::{CloudConfig, CloudProvider};
use crate::id::{ModelId, ProviderKind};
use crate::local::{LocalEngine, LocalProvider, StaticEngine};
use crate::provider::ModelProvider;
use crate::ModelError;

/// Turns a [`ModelId`] into a ready provider.
pub struct ProviderFactory {
    cloud: CloudConfig,
    local_engine: Arc<dyn LocalEngine>,
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new(CloudConfig::default(), Arc::new(StaticEngine::default()))
    }
}

impl ProviderFactory {
    pub fn new(cloud: CloudConfig, local_engine: Arc<dyn LocalEngine>) -> Self {
        Self { cloud, local_engine }
    }

    pub fn resolve(&self, id: &ModelId) -> Result<Arc<dyn ModelProvider>, ModelError> {
        tracing::debug!(model = %id, "resolving model provider");
        match id.kind {
            ProviderKind::Local => Ok(Arc::new(LocalProvider::new(
                id.name.clone(),
                Arc::clone(&self.local_engine),
            ))),
            ProviderKind::Cloud => Ok(Arc::new(CloudProvider::new(id.name.clone(), &self.cloud)?)),
        }
    }
}
