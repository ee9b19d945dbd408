//! Verifier configuration with TOML file support.

use std::path::Path;
use std::time::Duration;

use doppelcheck_models::{CloudConfig, LocalConfig, ModelId};
use doppelcheck_store::{Endpoint, DEFAULT_ENDPOINT};
use doppelcheck_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::VerifierError;

/// What to do when an identical request is already running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Wait for the running request and share its result.
    #[default]
    Join,
    /// Fail immediately with `DuplicateInFlight`.
    Reject,
}

/// Configuration for a [`Verifier`](crate::Verifier).
///
/// Can be loaded from a TOML file via [`VerifierConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Model identifier, `local:<name>` or `cloud:<name>`.
    #[serde(default = "default_model")]
    pub model: String,

    /// Evidence storage endpoint, `memory://<name>` or `lmdb://<path>`.
    #[serde(default = "default_evidence_url")]
    pub evidence_url: String,

    /// Minimum trust score for a report to count as trusted.
    #[serde(default = "default_trust_threshold")]
    pub trust_threshold: f64,

    /// Default model deadline in milliseconds.
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,

    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub cloud: CloudConfig,

    #[serde(default)]
    pub local: LocalConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_model() -> String {
    "local:mistral".to_string()
}

fn default_evidence_url() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_trust_threshold() -> f64 {
    0.8
}

fn default_provider_timeout_ms() -> u64 {
    30_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl VerifierConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, VerifierError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| VerifierError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, VerifierError> {
        toml::from_str(s).map_err(|e| VerifierError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, VerifierError> {
        toml::to_string_pretty(self).map_err(|e| VerifierError::Config(e.to_string()))
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), VerifierError> {
        ModelId::parse(&self.model)?;
        Endpoint::parse(&self.evidence_url)?;
        if !(0.0..=1.0).contains(&self.trust_threshold) {
            return Err(VerifierError::Config(format!(
                "trust_threshold {} outside [0, 1]",
                self.trust_threshold
            )));
        }
        if self.provider_timeout_ms == 0 {
            return Err(VerifierError::Config(
                "provider_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            evidence_url: default_evidence_url(),
            trust_threshold: default_trust_threshold(),
            provider_timeout_ms: default_provider_timeout_ms(),
            duplicate_policy: DuplicatePolicy::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            cloud: CloudConfig::default(),
            local: LocalConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doppelcheck_models::ModelError;
    use doppelcheck_store::StoreError;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = VerifierConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = VerifierConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = VerifierConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.model, "local:mistral");
        assert_eq!(config.evidence_url, "memory://localhost/evidence");
        assert_eq!(config.trust_threshold, 0.8);
        assert_eq!(config.provider_timeout(), Duration::from_secs(30));
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Join);
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            model = "cloud:gpt-x"
            duplicate_policy = "reject"
            log_format = "json"

            [cloud]
            endpoint = "https://models.example.org"
            api_key_env = "MODELS_KEY"

            [local]
            verdict = "unverified"
        "#;
        let config = VerifierConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.model, "cloud:gpt-x");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.cloud.api_key_env.as_deref(), Some("MODELS_KEY"));
        assert_eq!(config.cloud.max_retries, 2);
        assert_eq!(config.local.verdict, "unverified");
        assert_eq!(config.local.confidence, 0.95);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_model = VerifierConfig {
            model: "bogus:x".into(),
            ..Default::default()
        };
        assert_eq!(
            bad_model.validate(),
            Err(VerifierError::Model(ModelError::InvalidModelIdentifier(
                "bogus:x".into()
            )))
        );

        let bad_url = VerifierConfig {
            evidence_url: "s3://bucket".into(),
            ..Default::default()
        };
        assert!(matches!(
            bad_url.validate(),
            Err(VerifierError::Store(StoreError::InvalidEndpoint(_)))
        ));

        let bad_threshold = VerifierConfig {
            trust_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(bad_threshold.validate(), Err(VerifierError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = VerifierConfig::from_toml_file("/nonexistent/doppelcheck.toml");
        assert!(matches!(result, Err(VerifierError::Config(_))));
    }
}
