//! Remote inference over HTTPS.
//!
//! `POST {endpoint}/v1/models/{name}/predict` with the JSON input envelope.
//! Transport failures and 5xx responses are retried with exponential backoff;
//! 4xx responses are not.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::ModelInputs;
use crate::id::ProviderKind;
use crate::provider::ModelProvider;
use crate::ModelError;

/// Cloud provider settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Base URL of the inference service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the bearer token, if the service needs one.
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each further retry.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    250
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key_env: None,
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

pub struct CloudProvider {
    name: String,
    url: String,
    api_key: Option<String>,
    max_retries: u32,
    retry_backoff: Duration,
    /// Reusable HTTP client.
    client: reqwest::Client,
}

impl CloudProvider {
    /// Build a provider for `name`. Reads the API key once, here.
    pub fn new(name: impl Into<String>, config: &CloudConfig) -> Result<Self, ModelError> {
        let name = name.into();
        let api_key = match &config.api_key_env {
            Some(var) => Some(
                std::env::var(var).map_err(|_| ModelError::MissingCredentials(var.clone()))?,
            ),
            None => None,
        };
        let url = format!(
            "{}/v1/models/{}/predict",
            config.endpoint.trim_end_matches('/'),
            name
        );
        Ok(Self {
            name,
            url,
            api_key,
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn attempt(&self, inputs: &ModelInputs) -> Result<Value, Attempt> {
        let mut request = self.client.post(&self.url).json(inputs);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| Attempt::Retry(ModelError::ProviderUnavailable(e.to_string())))?;

        let status = resp.status();
        if status.is_server_error() {
            return Err(Attempt::Retry(ModelError::ProviderUnavailable(format!(
                "HTTP {} from {}",
                status, self.url
            ))));
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Attempt::Fail(ModelError::ProviderRejected {
                status: status.as_u16(),
                message,
            }));
        }
        resp.json()
            .await
            .map_err(|e| Attempt::Fail(ModelError::MalformedModelOutput(e.to_string())))
    }
}

enum Attempt {
    Retry(ModelError),
    Fail(ModelError),
}

#[async_trait]
impl ModelProvider for CloudProvider {
    async fn predict(&self, inputs: &ModelInputs) -> Result<Value, ModelError> {
        let mut attempt = 0u32;
        loop {
            match self.attempt(inputs).await {
                Ok(value) => return Ok(value),
                Err(Attempt::Fail(e)) => return Err(e),
                Err(Attempt::Retry(e)) if attempt >= self.max_retries => return Err(e),
                Err(Attempt::Retry(e)) => {
                    let delay = self.retry_backoff * 2u32.saturating_pow(attempt);
                    tracing::warn!(
                        provider = %self.name,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "cloud inference failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Cloud
    }

    fn name(&self) -> &str {
        &self.name
    }
}
