//! Claim extraction interface.

use async_trait::async_trait;
use doppelcheck_types::Claim;

use crate::ProtocolError;

/// Splits input text into verifiable claims.
#[async_trait]
pub trait ClaimExtractor: Send + Sync {
    async fn extract_claims(&self, text: &str) -> Result<Vec<Claim>, ProtocolError>;
}

/// Treats the whole input as a single statement.
#[derive(Clone, Copy, Debug, Default)]
pub struct WholeTextExtractor;

#[async_trait]
impl ClaimExtractor for WholeTextExtractor {
    async fn extract_claims(&self, text: &str) -> Result<Vec<Claim>, ProtocolError> {
        if text.trim().is_empty() {
            return Err(ProtocolError::EmptyClaim);
        }
        Ok(vec![Claim::statement(text)])
    }
}
