//! Mock implementations for testing.

use async_trait::async_trait;
use piper_vault_client::{KvSecret, KvSecretReader, VaultError, VaultResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory KV store with scripted answers.
///
/// Paths without a scripted secret or failure read as "not found". Every
/// query is recorded in order.
#[derive(Debug, Default, Clone)]
pub struct MockKvStore {
    secrets: HashMap<String, KvSecret>,
    failures: HashMap<String, String>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockKvStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a secret at `path`.
    #[must_use]
    pub fn with_secret<K, V>(mut self, path: impl Into<String>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let secret = fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.secrets.insert(path.into(), secret);
        self
    }

    /// Make reads of `path` fail with an unavailable error.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }

    /// Paths queried so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Number of queries so far.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Forget recorded queries.
    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }
}

#[async_trait]
impl KvSecretReader for MockKvStore {
    async fn get_kv_secret(&self, path: &str) -> VaultResult<Option<KvSecret>> {
        self.calls.write().await.push(path.to_string());

        if let Some(message) = self.failures.get(path) {
            return Err(VaultError::unavailable(message.clone()));
        }
        Ok(self.secrets.get(path).cloned())
    }
}
