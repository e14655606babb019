//! Step metadata: the parameters a step accepts and where their values may
//! come from.
//!
//! Metadata is authored as YAML next to each step:
//!
//! ```yaml
//! metadata:
//!   name: whitesourceExecuteScan
//! spec:
//!   inputs:
//!     params:
//!       - name: orgToken
//!         type: string
//!         mandatory: true
//!         resourceRef:
//!           - name: vaultPath
//!             type: vaultSecret
//!             path: whitesource
//! ```

use serde::{Deserialize, Serialize};

use crate::ConfigResult;

/// Reference type that points into the Vault KV store.
pub const VAULT_SECRET_REF: &str = "vaultSecret";

/// Complete metadata document of a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepData {
    /// Identity of the step
    pub metadata: StepMetadata,
    /// Inputs of the step
    #[serde(default)]
    pub spec: StepSpec,
}

/// Name and aliases of a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMetadata {
    /// Step name, e.g. `whitesourceExecuteScan`
    pub name: String,
    /// Alternative names
    #[serde(default)]
    pub aliases: Vec<Alias>,
    /// Short description
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct StepSpec {
    #[serde(default)]
    pub inputs: StepInputs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct StepInputs {
    #[serde(default)]
    pub params: Vec<StepParameter>,
}

/// Descriptor of one configuration parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepParameter {
    /// Parameter name, also the field name looked up inside secrets
    pub name: String,
    /// External sources of the value, tried in order
    #[serde(default)]
    pub resource_ref: Vec<ResourceReference>,
    /// Configuration sections the parameter may be set in
    #[serde(default)]
    pub scope: Vec<String>,
    /// Declared value type (`string`, `bool`, ...)
    #[serde(default, rename = "type")]
    pub param_type: String,
    /// Whether the step fails without it
    #[serde(default)]
    pub mandatory: bool,
    /// Alternative names
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

/// Pointer to an external source for a parameter value.
///
/// For `vaultSecret` references, `name` is the configuration key holding the
/// base path and `path` is appended to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// Configuration key (for Vault: key of the base path)
    pub name: String,
    /// Reference kind, e.g. `vaultSecret`
    #[serde(default, rename = "type")]
    pub ref_type: String,
    /// Parameter of the referenced resource
    #[serde(default)]
    pub param: String,
    /// Relative path below the base path
    #[serde(default)]
    pub path: String,
}

/// Alternative parameter or step name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Alias name
    pub name: String,
    /// Whether the alias is deprecated
    #[serde(default)]
    pub deprecated: bool,
}

impl StepData {
    /// Parses a metadata document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Yaml`] if the document is not valid
    /// step metadata.
    pub fn from_yaml(source: &str) -> ConfigResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Declared parameters in document order.
    #[must_use]
    pub fn parameters(&self) -> &[StepParameter] {
        &self.spec.inputs.params
    }
}

impl StepParameter {
    /// Creates a parameter without references.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: "string".to_string(),
            ..Default::default()
        }
    }

    /// Adds a `vaultSecret` reference.
    #[must_use]
    pub fn with_vault_secret(mut self, base_path_key: impl Into<String>, path: impl Into<String>) -> Self {
        self.resource_ref.push(ResourceReference {
            name: base_path_key.into(),
            ref_type: VAULT_SECRET_REF.to_string(),
            param: String::new(),
            path: path.into(),
        });
        self
    }

    /// References of the given kind, in declaration order.
    pub fn references<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ResourceReference> + 'a {
        self.resource_ref.iter().filter(move |r| r.ref_type == kind)
    }
}
