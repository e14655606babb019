//! Loads, merges and resolves a step configuration.

use anyhow::{Context, Result};
use piper_step_config::vault::VAULT_TOKEN_KEY;
use piper_step_config::{StepConfig, StepData, VAULT_SECRET_REF, resolve_from_vault};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tokio::fs;
use tracing::{debug, info};

use crate::Cli;

const MASK: &str = "****";

/// Outcome of resolving a step configuration.
#[derive(Debug)]
pub struct Resolution {
    /// Name of the step from its metadata
    pub step_name: String,
    /// Final configuration
    pub config: StepConfig,
    /// Number of parameters filled from Vault
    pub from_vault: usize,
    secret_keys: BTreeSet<String>,
}

impl Resolution {
    /// JSON view of the configuration, masking secrets unless `show_secrets`.
    #[must_use]
    pub fn render(&self, show_secrets: bool) -> Value {
        let map: Map<String, Value> = self
            .config
            .iter()
            .map(|(key, value)| {
                let rendered = if !show_secrets && self.secret_keys.contains(key) {
                    Value::String(MASK.to_string())
                } else {
                    serde_json::to_value(value).unwrap_or(Value::Null)
                };
                (key.clone(), rendered)
            })
            .collect();
        Value::Object(map)
    }
}

/// Runs the resolution described by the command line.
///
/// # Errors
///
/// Fails if either file cannot be read or parsed, or if Vault resolution
/// fails.
pub async fn resolve(cli: &Cli) -> Result<Resolution> {
    let source = fs::read_to_string(&cli.config)
        .await
        .with_context(|| format!("reading step configuration {}", cli.config.display()))?;
    let mut config = StepConfig::from_yaml(&source)
        .with_context(|| format!("parsing step configuration {}", cli.config.display()))?;

    let source = fs::read_to_string(&cli.metadata)
        .await
        .with_context(|| format!("reading step metadata {}", cli.metadata.display()))?;
    let metadata = StepData::from_yaml(&source)
        .with_context(|| format!("parsing step metadata {}", cli.metadata.display()))?;

    for (key, value) in cli.vault.entries() {
        debug!(key, "Vault input from command line");
        config.set(key, value);
    }

    let from_vault = resolve_from_vault(&mut config, metadata.parameters())
        .await
        .with_context(|| format!("resolving secrets for step {}", metadata.metadata.name))?;

    info!(step = %metadata.metadata.name, from_vault, "Step configuration resolved");

    let secret_keys = metadata
        .parameters()
        .iter()
        .filter(|p| p.references(VAULT_SECRET_REF).next().is_some())
        .map(|p| p.name.clone())
        .chain(std::iter::once(VAULT_TOKEN_KEY.to_string()))
        .collect();

    Ok(Resolution {
        step_name: metadata.metadata.name,
        config,
        from_vault,
        secret_keys,
    })
}
