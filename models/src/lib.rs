//! Model gateway.
//!
//! A model identifier such as `local:mistral` or `cloud:gpt-x` is parsed once
//! into a [`ModelId`] and resolved by the [`ProviderFactory`] into a provider.
//! The [`ModelGateway`] builds the standard input envelope, calls the provider
//! under a deadline, and checks the response carries the mandatory fields.
//!
//! Local and cloud providers share one contract and differ only in transport:
//! local inference runs in-process through a [`LocalEngine`], cloud inference is
//! an HTTPS JSON call.

pub mod cloud;
pub mod envelope;
pub mod error;
pub mod factory;
pub mod gateway;
pub mod id;
pub mod local;
pub mod provider;

pub use cloud::{CloudConfig, CloudProvider};
pub use envelope::{validate_output, ModelInputs, VerificationResult, REQUIRED_OUTPUT_FIELDS};
pub use error::ModelError;
pub use factory::ProviderFactory;
pub use gateway::{ModelGateway, DEFAULT_PROVIDER_TIMEOUT};
pub use id::{ModelId, ProviderKind};
pub use local::{LocalConfig, LocalEngine, LocalProvider, StaticEngine};
pub use provider::ModelProvider;
