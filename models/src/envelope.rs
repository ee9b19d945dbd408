//! Model input envelope and output contract.

use doppelcheck_trust::{ChainLink, TrustChain};
use doppelcheck_types::NormalizedSource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ModelError;

/// Fields every model response must carry.
pub const REQUIRED_OUTPUT_FIELDS: [&str; 3] =
    ["verification_result", "confidence_score", "evidence_links"];

/// Standardized input handed to every provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelInputs {
    pub claim: String,
    pub sources: Vec<NormalizedSource>,
    pub trust_chain_data: Vec<ChainLink>,
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl ModelInputs {
    pub fn new(
        claim: &str,
        sources: &[NormalizedSource],
        trust_chain: &TrustChain,
        context: Option<&Map<String, Value>>,
    ) -> Self {
        Self {
            claim: claim.to_string(),
            sources: sources.to_vec(),
            trust_chain_data: trust_chain.links().to_vec(),
            context: context.cloned().unwrap_or_default(),
        }
    }
}

/// A validated model verdict. Extra provider fields are kept in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verification_result: String,
    pub confidence_score: f64,
    pub evidence_links: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerificationResult {
    pub fn new(verdict: &str, confidence_score: f64, evidence_links: Vec<Value>) -> Self {
        Self {
            verification_result: verdict.to_string(),
            confidence_score,
            evidence_links,
            extra: Map::new(),
        }
    }
}

/// Check a raw provider response against the output contract.
///
/// A missing mandatory field is `IncompleteModelOutput`; a present field of the
/// wrong shape, or a confidence outside [0, 1], is `MalformedModelOutput`.
pub fn validate_output(output: Value) -> Result<VerificationResult, ModelError> {
    let object = match &output {
        Value::Object(map) => map,
        other => {
            return Err(ModelError::MalformedModelOutput(format!(
                "expected a JSON object, got {}",
                kind_of(other)
            )))
        }
    };
    for field in REQUIRED_OUTPUT_FIELDS {
        if !object.contains_key(field) {
            return Err(ModelError::IncompleteModelOutput { field });
        }
    }
    let result: VerificationResult = serde_json::from_value(output)
        .map_err(|e| ModelError::MalformedModelOutput(e.to_string()))?;
    if !(result.confidence_score.is_finite() && (0.0..=1.0).contains(&result.confidence_score)) {
        return Err(ModelError::MalformedModelOutput(format!(
            "confidence_score {} outside [0, 1]",
            result.confidence_score
        )));
    }
    Ok(result)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_complete_output_and_keeps_extras() {
        let out = validate_output(json!({
            "verification_result": "verified",
            "confidence_score": 0.95,
            "evidence_links": ["https://example.org"],
            "model_version": "7b",
        }))
        .unwrap();
        assert_eq!(out.verification_result, "verified");
        assert_eq!(out.evidence_links.len(), 1);
        assert_eq!(out.extra["model_version"], "7b");
    }

    #[test]
    fn each_missing_field_is_reported() {
        for field in REQUIRED_OUTPUT_FIELDS {
            let mut full = json!({
                "verification_result": "verified",
                "confidence_score": 0.5,
                "evidence_links": [],
            });
            full.as_object_mut().unwrap().remove(field);
            assert_eq!(
                validate_output(full),
                Err(ModelError::IncompleteModelOutput { field })
            );
        }
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let err = validate_output(json!({
            "verification_result": "verified",
            "confidence_score": 1.5,
            "evidence_links": [],
        }))
        .unwrap_err();
        assert!(matches!(err, ModelError::MalformedModelOutput(_)));
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert!(matches!(
            validate_output(json!(["verified"])),
            Err(ModelError::MalformedModelOutput(_))
        ));
        assert!(matches!(
            validate_output(json!({
                "verification_result": "verified",
                "confidence_score": "high",
                "evidence_links": [],
            })),
            Err(ModelError::MalformedModelOutput(_))
        ));
    }

    #[test]
    fn envelope_uses_trust_chain_data_key() {
        let inputs = ModelInputs::new("c", &[], &TrustChain::new(), None);
        let json = serde_json::to_value(&inputs).unwrap();
        assert!(json.get("trust_chain_data").is_some());
        assert_eq!(json["context"], json!({}));
    }
}
