//! Step configuration errors.

use piper_vault_client::VaultError;
use thiserror::Error;

/// Errors raised while loading or resolving step configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Vault client construction or a secret lookup failed
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// A secret reference names a base path key that is not configured
    #[error("Parameter {parameter}: base path key {key:?} is not set as a string")]
    MissingBasePath {
        /// Parameter being resolved
        parameter: String,
        /// Configuration key that should hold the base path
        key: String,
    },

    /// Configuration or metadata document could not be parsed
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Configuration document is not a mapping at the top level
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Check if the underlying failure is transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Vault(inner) => inner.is_retryable(),
            _ => false,
        }
    }
}
