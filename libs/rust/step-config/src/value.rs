//! Scalar configuration values.

use serde::Serialize;
use serde_yaml_ng::Value as YamlValue;
use std::fmt;

/// A scalar configuration value.
///
/// Absence is expressed as `Option<&ConfigValue>` at lookup sites, so only
/// "set as string" counts as explicitly configured for secret parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Text value; numbers from documents are kept in their textual form
    String(String),
    /// Boolean switch
    Bool(bool),
}

impl ConfigValue {
    /// String payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    /// Converts a YAML scalar. Null, sequences and mappings yield `None`.
    #[must_use]
    pub fn from_yaml(value: &YamlValue) -> Option<Self> {
        match value {
            YamlValue::String(s) => Some(Self::String(s.clone())),
            YamlValue::Bool(b) => Some(Self::Bool(*b)),
            YamlValue::Number(n) => Some(Self::String(n.to_string())),
            YamlValue::Tagged(tagged) => Self::from_yaml(&tagged.value),
            YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
