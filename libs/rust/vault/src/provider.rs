//! Key/value secret reader trait.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::VaultResult;

/// Flat mapping of field name to value stored at one secret path.
pub type KvSecret = HashMap<String, String>;

/// Anything that can read a flat key/value secret by path.
///
/// `Ok(None)` means nothing is stored at the path; that is not an error.
#[async_trait]
pub trait KvSecretReader: Send + Sync {
    /// Read the secret at `path`.
    async fn get_kv_secret(&self, path: &str) -> VaultResult<Option<KvSecret>>;
}
