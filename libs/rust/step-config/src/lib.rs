//! Step configuration for piper pipeline steps.
//!
//! Holds the per-step configuration mapping, the step metadata that
//! describes its parameters, and the resolver that fills unset parameters
//! from HashiCorp Vault without touching values that were set explicitly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod metadata;
pub mod step_config;
pub mod value;
pub mod vault;

pub use error::{ConfigError, ConfigResult};
pub use metadata::{Alias, ResourceReference, StepData, StepParameter, VAULT_SECRET_REF};
pub use step_config::StepConfig;
pub use value::ConfigValue;
pub use vault::{resolve_from_vault, resolve_vault_config, vault_client_from_config};
