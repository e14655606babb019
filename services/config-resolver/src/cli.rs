//! Command line arguments.

use clap::{Args, Parser};
use piper_step_config::ConfigValue;
use piper_step_config::vault::{VAULT_ADDRESS_KEY, VAULT_NAMESPACE_KEY, VAULT_ROOT_PATH_KEY, VAULT_TOKEN_KEY};
use std::path::PathBuf;

/// Resolve a pipeline step configuration, filling secret parameters from Vault.
#[derive(Debug, Parser)]
#[command(name = "piper-config", version, about, long_about = None)]
pub struct Cli {
    /// Step configuration file (flat YAML mapping)
    #[arg(short, long, default_value = ".pipeline/step-config.yml")]
    pub config: PathBuf,

    /// Step metadata file declaring the step parameters
    #[arg(short, long)]
    pub metadata: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Print secret values instead of masking them
    #[arg(long)]
    pub show_secrets: bool,

    #[command(flatten)]
    pub vault: VaultArgs,
}

/// Vault connection inputs.
#[derive(Debug, Default, Clone, Args)]
pub struct VaultArgs {
    /// Vault server address
    #[arg(long = "vault-address", env = "PIPER_vaultAddress")]
    pub address: Option<String>,

    /// KV root path that must be set for Vault to be used
    #[arg(long = "vault-root-path", env = "PIPER_vaultRootPath")]
    pub root_path: Option<String>,

    /// Vault access token
    #[arg(long = "vault-token", env = "PIPER_vaultToken", hide_env_values = true)]
    pub token: Option<String>,

    /// Vault Enterprise namespace
    #[arg(long = "vault-namespace", env = "PIPER_vaultNamespace")]
    pub namespace: Option<String>,
}

impl VaultArgs {
    /// Configuration entries for the inputs that were given.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, ConfigValue)> {
        [
            (VAULT_ADDRESS_KEY, &self.address),
            (VAULT_ROOT_PATH_KEY, &self.root_path),
            (VAULT_TOKEN_KEY, &self.token),
            (VAULT_NAMESPACE_KEY, &self.namespace),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), ConfigValue::from(v.clone()))))
        .collect()
    }
}
