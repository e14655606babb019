//! Test fixtures with sample data.

use serde_json::{Map, Value, json};

/// Step metadata with Vault-backed token parameters.
///
/// `orgToken` and `userToken` look in `<vaultPath>/whitesource` first and
/// `<vaultBasePath>/GROUP-SECRETS/whitesource` second.
pub const WHITESOURCE_METADATA_YAML: &str = r"
metadata:
  name: whitesourceExecuteScan
  description: Execute a WhiteSource scan
spec:
  inputs:
    params:
      - name: productName
        type: string
        mandatory: true
        scope: [GENERAL, PARAMETERS, STAGES, STEPS]
      - name: orgToken
        type: string
        mandatory: true
        scope: [GENERAL, PARAMETERS, STAGES, STEPS]
        resourceRef:
          - name: vaultPath
            type: vaultSecret
            path: whitesource
          - name: vaultBasePath
            type: vaultSecret
            path: GROUP-SECRETS/whitesource
      - name: userToken
        type: string
        mandatory: true
        scope: [GENERAL, PARAMETERS, STAGES, STEPS]
        resourceRef:
          - name: vaultPath
            type: vaultSecret
            path: whitesource
          - name: vaultBasePath
            type: vaultSecret
            path: GROUP-SECRETS/whitesource
      - name: verbose
        type: bool
        scope: [GENERAL, PARAMETERS, STAGES, STEPS]
";

/// `sys/internal/ui/mounts/<path>` response for a KV mount.
#[must_use]
pub fn kv_mount_response(mount: &str, version: u8) -> Value {
    json!({
        "data": {
            "path": mount,
            "type": "kv",
            "options": { "version": version.to_string() }
        }
    })
}

/// Logical read response of a KV v2 secret.
#[must_use]
pub fn kv_v2_read_response(fields: &[(&str, &str)]) -> Value {
    json!({
        "data": {
            "data": field_map(fields),
            "metadata": {
                "created_time": "2026-01-01T00:00:00Z",
                "deletion_time": "",
                "destroyed": false,
                "version": 1
            }
        },
        "lease_id": "",
        "lease_duration": 0,
        "renewable": false
    })
}

/// Logical read response of a KV v1 secret.
#[must_use]
pub fn kv_v1_read_response(fields: &[(&str, &str)]) -> Value {
    json!({
        "data": field_map(fields),
        "lease_id": "",
        "lease_duration": 2_764_800,
        "renewable": false
    })
}

fn field_map(fields: &[(&str, &str)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
        .collect()
}
