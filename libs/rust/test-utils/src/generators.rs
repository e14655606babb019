//! Shared proptest generators.

use proptest::prelude::*;

/// Generate camelCase parameter names like `orgToken`.
pub fn parameter_name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{2,10}[A-Z][a-z]{2,8}"
}

/// Generate a single plain path segment.
pub fn path_segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,12}"
}

/// Generate Vault base paths such as `secret/data/team-a`.
pub fn base_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("secret/data/team".to_string()),
        Just("kv/piper".to_string()),
        prop::collection::vec(path_segment_strategy(), 1..4).prop_map(|segments| segments.join("/")),
    ]
}

/// Generate non-empty secret values.
pub fn secret_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!@#$%^&*]{8,40}"
}

/// Generate Vault namespace names.
pub fn namespace_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{2,20}"
}
