//! Wire types for the Vault HTTP API responses the KV client reads.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Generic logical read response (`GET /v1/<path>`).
#[derive(Debug, Default, Deserialize)]
pub struct LogicalResponse {
    /// Secret payload; for KV v2 reads this wraps `data` and `metadata`
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

/// Mount information from `sys/internal/ui/mounts/<path>`.
#[derive(Debug, Clone, Deserialize)]
pub struct MountInfo {
    /// Mount path including trailing slash, e.g. `secret/`
    pub path: String,
    /// Engine type, `kv` for key/value mounts
    #[serde(default, rename = "type")]
    pub engine_type: String,
    /// Engine options; KV v2 mounts carry `version: "2"`
    #[serde(default)]
    pub options: Option<HashMap<String, String>>,
}

/// Key/value engine version of a mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvVersion {
    /// Unversioned KV engine; payload is `data`
    V1,
    /// Versioned KV engine; payload is `data.data`
    V2,
}

impl MountInfo {
    /// Engine version derived from the mount options.
    #[must_use]
    pub fn kv_version(&self) -> KvVersion {
        match self.options.as_ref().and_then(|o| o.get("version")) {
            Some(v) if v == "2" => KvVersion::V2,
            _ => KvVersion::V1,
        }
    }
}

/// Keeps only the string-valued fields of a secret payload.
#[must_use]
pub fn string_fields(data: &Map<String, Value>) -> HashMap<String, String> {
    data.iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}
