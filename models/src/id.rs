//! Model identifiers.

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Which transport serves a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Local,
    Cloud,
}

impl ProviderKind {
    pub fn scheme(&self) -> &'static str {
        match self {
            ProviderKind::Local => "local",
            ProviderKind::Cloud => "cloud",
        }
    }
}

/// A parsed `<scheme>:<name>` model identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelId {
    pub kind: ProviderKind,
    pub name: String,
}

impl ModelId {
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidModelIdentifier(s.to_string());
        let (scheme, name) = s.split_once(':').ok_or_else(invalid)?;
        let kind = match scheme {
            "local" => ProviderKind::Local,
            "cloud" => ProviderKind::Cloud,
            _ => return Err(invalid()),
        };
        if name.trim().is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            kind,
            name: name.to_string(),
        })
    }
}

impl FromStr for ModelId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.scheme(), self.name)
    }
}
