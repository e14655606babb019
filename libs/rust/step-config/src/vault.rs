//! Fills unset step parameters from Vault.
//!
//! A parameter is looked up only when the configuration does not already
//! hold a string for it. Its `vaultSecret` references are tried in order and
//! the first non-empty field named like the parameter wins. Any lookup error
//! aborts the whole pass.

use piper_vault_client::{KvSecretReader, VaultClient, VaultConfig, join_path};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::{ConfigError, ConfigResult, ConfigValue, StepConfig, StepParameter, VAULT_SECRET_REF};

/// Configuration key of the Vault server address.
pub const VAULT_ADDRESS_KEY: &str = "vaultAddress";
/// Configuration key of the KV root path.
pub const VAULT_ROOT_PATH_KEY: &str = "vaultRootPath";
/// Configuration key of the Vault token.
pub const VAULT_TOKEN_KEY: &str = "vaultToken";
/// Configuration key of the Vault enterprise namespace.
pub const VAULT_NAMESPACE_KEY: &str = "vaultNamespace";

/// Builds a Vault client from the step configuration.
///
/// Returns `Ok(None)` when address, root path or token is missing or empty:
/// Vault is simply not in use for this step.
///
/// # Errors
///
/// Propagates client construction failures such as an invalid address.
pub fn vault_client_from_config(config: &StepConfig) -> ConfigResult<Option<VaultClient>> {
    let non_empty = |key: &str| config.get_str(key).filter(|v| !v.is_empty());

    let (Some(address), Some(_), Some(token)) = (
        non_empty(VAULT_ADDRESS_KEY),
        non_empty(VAULT_ROOT_PATH_KEY),
        non_empty(VAULT_TOKEN_KEY),
    ) else {
        debug!("Vault address, root path or token not configured; skipping Vault");
        return Ok(None);
    };

    // namespaces only exist in Vault Enterprise
    let namespace = config.get_str(VAULT_NAMESPACE_KEY).unwrap_or_default();

    let client = VaultClient::new(VaultConfig::new(address, token).with_namespace(namespace))?;
    info!(address, namespace, "Using Vault for secret parameters");
    Ok(Some(client))
}

/// Looks up every unset parameter in Vault.
///
/// Returns only the newly found values; `config` is not modified. A parameter
/// listed more than once is looked up once.
///
/// # Errors
///
/// Returns the first lookup error, or [`ConfigError::MissingBasePath`] when a
/// reference's base path key is not set as a string. No partial result is
/// returned in either case.
pub async fn resolve_vault_config<C>(
    client: &C,
    config: &StepConfig,
    params: &[StepParameter],
) -> ConfigResult<BTreeMap<String, ConfigValue>>
where
    C: KvSecretReader + ?Sized,
{
    let mut resolved = BTreeMap::new();

    for param in params {
        if config.is_set_as_string(&param.name) || resolved.contains_key(&param.name) {
            continue;
        }

        for reference in param.references(VAULT_SECRET_REF) {
            let base_path = config
                .get_str(&reference.name)
                .ok_or_else(|| ConfigError::MissingBasePath {
                    parameter: param.name.clone(),
                    key: reference.name.clone(),
                })?;
            let lookup_path = join_path(&[base_path, reference.path.as_str()]);
            debug!(parameter = %param.name, path = %lookup_path, "Looking up secret");

            let secret = client.get_kv_secret(&lookup_path).await.inspect_err(|e| {
                warn!(parameter = %param.name, path = %lookup_path, error = %e, "Vault lookup failed");
            })?;
            let Some(secret) = secret else {
                continue;
            };

            if let Some(value) = secret.get(&param.name).filter(|v| !v.is_empty()) {
                info!(parameter = %param.name, path = %lookup_path, "Resolved parameter from Vault");
                resolved.insert(param.name.clone(), ConfigValue::String(value.clone()));
                break;
            }
        }
    }

    Ok(resolved)
}

/// Builds a client from `config` and mixes the resolved values into it.
///
/// Returns the number of parameters filled in; zero when Vault is not
/// configured.
///
/// # Errors
///
/// Propagates client construction and lookup failures.
pub async fn resolve_from_vault(config: &mut StepConfig, params: &[StepParameter]) -> ConfigResult<usize> {
    let Some(client) = vault_client_from_config(config)? else {
        return Ok(0);
    };
    config.apply_vault(&client, params).await
}

impl StepConfig {
    /// Resolves unset parameters through `client` and adds them.
    ///
    /// # Errors
    ///
    /// See [`resolve_vault_config`]; on error the configuration is unchanged.
    pub async fn apply_vault<C>(&mut self, client: &C, params: &[StepParameter]) -> ConfigResult<usize>
    where
        C: KvSecretReader + ?Sized,
    {
        let resolved = resolve_vault_config(client, self, params).await?;
        Ok(self.mix_in(resolved))
    }
}
