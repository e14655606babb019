//! The resolved configuration mapping of one step.

use serde::Serialize;
use serde_yaml_ng::Value as YamlValue;
use std::collections::BTreeMap;
use tracing::debug;

use crate::{ConfigError, ConfigResult, ConfigValue};

/// Configuration mapping of a step: parameter name to scalar value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepConfig {
    config: BTreeMap<String, ConfigValue>,
}

impl StepConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a flat YAML mapping.
    ///
    /// Non-scalar entries (lists, maps, null) are skipped; steps that need
    /// them read the document themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not YAML or not a mapping.
    pub fn from_yaml(source: &str) -> ConfigResult<Self> {
        let doc: YamlValue = serde_yaml_ng::from_str(source)?;
        let mapping = match doc {
            YamlValue::Mapping(m) => m,
            YamlValue::Null => return Ok(Self::new()),
            _ => return Err(ConfigError::Invalid("top level must be a mapping".to_string())),
        };

        let mut config = Self::new();
        for (key, value) in &mapping {
            let Some(key) = key.as_str() else {
                debug!(?key, "Skipping non-string configuration key");
                continue;
            };
            match ConfigValue::from_yaml(value) {
                Some(v) => config.set(key, v),
                None => debug!(key, "Skipping non-scalar configuration value"),
            }
        }
        Ok(config)
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.config.get(key)
    }

    /// String value stored under `key`; bools read as unset.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    /// Whether `key` holds a string value, empty strings included.
    #[must_use]
    pub fn is_set_as_string(&self, key: &str) -> bool {
        self.get_str(key).is_some()
    }

    /// Sets `key`, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.config.insert(key.into(), value.into());
    }

    /// Adds entries whose keys are not present yet; existing values win.
    ///
    /// Returns the number of entries added.
    pub fn mix_in<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, ConfigValue)>,
    {
        let mut added = 0;
        for (key, value) in entries {
            if let std::collections::btree_map::Entry::Vacant(slot) = self.config.entry(key) {
                slot.insert(value);
                added += 1;
            }
        }
        added
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.config.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.config.len()
    }

    /// Whether the configuration is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }
}

impl FromIterator<(String, ConfigValue)> for StepConfig {
    fn from_iter<T: IntoIterator<Item = (String, ConfigValue)>>(iter: T) -> Self {
        Self {
            config: iter.into_iter().collect(),
        }
    }
}
