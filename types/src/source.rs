//! Raw and normalized source records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A source as supplied by the caller: a free-form JSON object that is
/// expected to carry at least `url`, `content` and `type`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSource(pub Map<String, Value>);

impl RawSource {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Convenience constructor for the three required fields.
    pub fn from_parts(url: &str, content: &str, source_type: &str) -> Self {
        Self::new()
            .with("url", url)
            .with("content", content)
            .with("type", source_type)
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The field as a string, if present and a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for RawSource {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A source that passed validation. Unknown fields have been dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedSource {
    pub url: String,
    pub content: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub validated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_source_is_a_plain_object() {
        let raw = RawSource::from_parts("a", "x", "t").with("extra", 3);
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["url"], "a");
        assert_eq!(json["extra"], 3);
    }

    #[test]
    fn get_str_ignores_non_strings() {
        let raw = RawSource::new().with("url", 42);
        assert!(raw.get("url").is_some());
        assert!(raw.get_str("url").is_none());
    }
}
