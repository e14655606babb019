//! Resolution of step parameters from a scripted KV store.

use piper_step_config::vault::{VAULT_ADDRESS_KEY, VAULT_NAMESPACE_KEY, VAULT_ROOT_PATH_KEY, VAULT_TOKEN_KEY};
use piper_step_config::{
    ConfigError, ConfigValue, StepConfig, StepData, StepParameter, resolve_vault_config, vault_client_from_config,
};
use piper_vault_client::VaultError;
use proptest::prelude::*;
use test_utils::fixtures::WHITESOURCE_METADATA_YAML;
use test_utils::{
    MockKvStore, base_path_strategy, namespace_strategy, parameter_name_strategy, path_segment_strategy,
    secret_value_strategy,
};

fn base_config() -> StepConfig {
    let mut config = StepConfig::new();
    config.set("vaultPath", "secret/data/team");
    config.set("vaultBasePath", "secret/data");
    config
}

#[tokio::test]
async fn test_explicit_string_is_never_looked_up() {
    let store = MockKvStore::new().with_secret("secret/data/team/ws", [("orgToken", "from-vault")]);
    let mut config = base_config();
    config.set("orgToken", "explicit");
    let params = [StepParameter::new("orgToken").with_vault_secret("vaultPath", "ws")];

    let resolved = resolve_vault_config(&store, &config, &params).await.unwrap();

    assert!(resolved.is_empty());
    assert_eq!(store.call_count().await, 0);
}

#[tokio::test]
async fn test_empty_explicit_string_still_counts_as_set() {
    let store = MockKvStore::new().with_secret("secret/data/team/ws", [("orgToken", "from-vault")]);
    let mut config = base_config();
    config.set("orgToken", "");
    let params = [StepParameter::new("orgToken").with_vault_secret("vaultPath", "ws")];

    let resolved = resolve_vault_config(&store, &config, &params).await.unwrap();

    assert!(resolved.is_empty());
    assert_eq!(store.call_count().await, 0);
}

#[tokio::test]
async fn test_bool_value_does_not_block_lookup() {
    let store = MockKvStore::new().with_secret("secret/data/team/ws", [("orgToken", "from-vault")]);
    let mut config = base_config();
    config.set("orgToken", true);
    let params = [StepParameter::new("orgToken").with_vault_secret("vaultPath", "ws")];

    let resolved = resolve_vault_config(&store, &config, &params).await.unwrap();

    assert_eq!(resolved.get("orgToken"), Some(&ConfigValue::from("from-vault")));
}

#[tokio::test]
async fn test_parameter_without_references_is_not_queried() {
    let store = MockKvStore::new();
    let params = [StepParameter::new("productName")];

    let resolved = resolve_vault_config(&store, &base_config(), &params).await.unwrap();

    assert!(resolved.is_empty());
    assert_eq!(store.call_count().await, 0);
}

#[tokio::test]
async fn test_falls_through_to_second_reference() {
    let store = MockKvStore::new().with_secret("secret/data/GROUP/ws", [("orgToken", "group-token")]);
    let params = [StepParameter::new("orgToken")
        .with_vault_secret("vaultPath", "ws")
        .with_vault_secret("vaultBasePath", "GROUP/ws")];

    let resolved = resolve_vault_config(&store, &base_config(), &params).await.unwrap();

    assert_eq!(resolved.get("orgToken"), Some(&ConfigValue::from("group-token")));
    assert_eq!(store.calls().await, vec!["secret/data/team/ws", "secret/data/GROUP/ws"]);
}

#[tokio::test]
async fn test_first_match_wins_and_short_circuits() {
    let store = MockKvStore::new()
        .with_secret("secret/data/team/ws", [("orgToken", "team-token")])
        .with_secret("secret/data/GROUP/ws", [("orgToken", "group-token")]);
    let params = [StepParameter::new("orgToken")
        .with_vault_secret("vaultPath", "ws")
        .with_vault_secret("vaultBasePath", "GROUP/ws")];

    let resolved = resolve_vault_config(&store, &base_config(), &params).await.unwrap();

    assert_eq!(resolved.get("orgToken"), Some(&ConfigValue::from("team-token")));
    assert_eq!(store.calls().await, vec!["secret/data/team/ws"]);
}

#[tokio::test]
async fn test_secret_without_field_or_empty_field_falls_through() {
    let store = MockKvStore::new()
        .with_secret("secret/data/team/ws", [("userToken", "other-field")])
        .with_secret("secret/data/team/empty", [("orgToken", "")])
        .with_secret("secret/data/GROUP/ws", [("orgToken", "group-token")]);
    let params = [StepParameter::new("orgToken")
        .with_vault_secret("vaultPath", "ws")
        .with_vault_secret("vaultPath", "empty")
        .with_vault_secret("vaultBasePath", "GROUP/ws")];

    let resolved = resolve_vault_config(&store, &base_config(), &params).await.unwrap();

    assert_eq!(resolved.get("orgToken"), Some(&ConfigValue::from("group-token")));
    assert_eq!(store.call_count().await, 3);
}

#[tokio::test]
async fn test_unresolved_parameter_is_absent() {
    let store = MockKvStore::new();
    let params = [StepParameter::new("orgToken").with_vault_secret("vaultPath", "ws")];

    let resolved = resolve_vault_config(&store, &base_config(), &params).await.unwrap();

    assert!(!resolved.contains_key("orgToken"));
}

#[tokio::test]
async fn test_lookup_error_aborts_whole_pass() {
    let store = MockKvStore::new()
        .with_secret("secret/data/team/ws", [("orgToken", "team-token")])
        .with_failure("secret/data/team/user", "Vault is sealed")
        .with_secret("secret/data/team/product", [("productToken", "p")]);
    let params = [
        StepParameter::new("orgToken").with_vault_secret("vaultPath", "ws"),
        StepParameter::new("userToken").with_vault_secret("vaultPath", "user"),
        StepParameter::new("productToken").with_vault_secret("vaultPath", "product"),
    ];

    let err = resolve_vault_config(&store, &base_config(), &params).await.unwrap_err();

    assert!(matches!(err, ConfigError::Vault(VaultError::Unavailable(ref m)) if m == "Vault is sealed"));
    assert_eq!(store.calls().await, vec!["secret/data/team/ws", "secret/data/team/user"]);
}

#[tokio::test]
async fn test_apply_vault_leaves_config_untouched_on_error() {
    let store = MockKvStore::new()
        .with_secret("secret/data/team/ws", [("orgToken", "team-token")])
        .with_failure("secret/data/team/user", "denied");
    let params = [
        StepParameter::new("orgToken").with_vault_secret("vaultPath", "ws"),
        StepParameter::new("userToken").with_vault_secret("vaultPath", "user"),
    ];
    let mut config = base_config();
    let before = config.clone();

    assert!(config.apply_vault(&store, &params).await.is_err());
    assert_eq!(config, before);
}

#[tokio::test]
async fn test_missing_base_path_key_is_error() {
    let store = MockKvStore::new();
    let params = [StepParameter::new("orgToken").with_vault_secret("vaultCustomPath", "ws")];

    let err = resolve_vault_config(&store, &base_config(), &params).await.unwrap_err();

    assert!(matches!(err, ConfigError::MissingBasePath { ref key, .. } if key == "vaultCustomPath"));
    assert_eq!(store.call_count().await, 0);
}

#[tokio::test]
async fn test_lookup_path_is_normalized_join() {
    let store = MockKvStore::new();
    let mut config = StepConfig::new();
    config.set("vaultPath", "secret/data/team/");
    let params = [
        StepParameter::new("a").with_vault_secret("vaultPath", "ci"),
        StepParameter::new("b").with_vault_secret("vaultPath", ""),
        StepParameter::new("c").with_vault_secret("vaultPath", "../shared//ci/"),
    ];

    resolve_vault_config(&store, &config, &params).await.unwrap();

    assert_eq!(
        store.calls().await,
        vec!["secret/data/team/ci", "secret/data/team", "secret/data/shared/ci"]
    );
}

#[tokio::test]
async fn test_duplicate_parameter_is_looked_up_once() {
    let store = MockKvStore::new().with_secret("secret/data/team/ws", [("orgToken", "t")]);
    let param = StepParameter::new("orgToken").with_vault_secret("vaultPath", "ws");
    let params = [param.clone(), param];

    let resolved = resolve_vault_config(&store, &base_config(), &params).await.unwrap();

    assert_eq!(resolved.len(), 1);
    assert_eq!(store.call_count().await, 1);
}

#[tokio::test]
async fn test_metadata_driven_resolution() {
    let data = StepData::from_yaml(WHITESOURCE_METADATA_YAML).unwrap();
    let store = MockKvStore::new()
        .with_secret("secret/data/team/whitesource", [("userToken", "user-1")])
        .with_secret("secret/data/GROUP-SECRETS/whitesource", [("orgToken", "org-1"), ("userToken", "ignored")]);
    let mut config = base_config();
    config.set("productName", "demo");

    let added = config.apply_vault(&store, data.parameters()).await.unwrap();

    assert_eq!(added, 2);
    assert_eq!(config.get_str("orgToken"), Some("org-1"));
    assert_eq!(config.get_str("userToken"), Some("user-1"));
    assert_eq!(config.get_str("productName"), Some("demo"));
    assert!(config.get("verbose").is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Explicit string values survive resolution and are never queried.
    #[test]
    fn prop_explicit_values_win(
        name in parameter_name_strategy(),
        explicit in secret_value_strategy(),
        stored in secret_value_strategy(),
    ) {
        let store = MockKvStore::new().with_secret("secret/data/team/ci", [(name.clone(), stored)]);
        let mut config = base_config();
        config.set(name.clone(), explicit.clone());
        let params = [StepParameter::new(name.clone()).with_vault_secret("vaultPath", "ci")];

        let added = tokio_test::block_on(config.apply_vault(&store, &params)).unwrap();

        prop_assert_eq!(added, 0);
        prop_assert_eq!(config.get_str(&name), Some(explicit.as_str()));
        prop_assert_eq!(tokio_test::block_on(store.call_count()), 0);
    }

    /// With every reference populated, the first one in order wins.
    #[test]
    fn prop_first_reference_wins(
        name in parameter_name_strategy(),
        values in prop::collection::vec(secret_value_strategy(), 1..5),
    ) {
        let mut store = MockKvStore::new();
        let mut param = StepParameter::new(name.clone());
        for (i, value) in values.iter().enumerate() {
            let rel = format!("ref{i}");
            store = store.with_secret(format!("secret/data/team/{rel}"), [(name.clone(), value.clone())]);
            param = param.with_vault_secret("vaultPath", rel);
        }

        let resolved = tokio_test::block_on(resolve_vault_config(&store, &base_config(), &[param])).unwrap();

        prop_assert_eq!(resolved.get(&name), Some(&ConfigValue::from(values[0].clone())));
        prop_assert_eq!(tokio_test::block_on(store.call_count()), 1);
    }

    /// The lookup path is the base path joined with the reference path.
    #[test]
    fn prop_lookup_path_joins_base_and_reference(
        name in parameter_name_strategy(),
        base in base_path_strategy(),
        segment in path_segment_strategy(),
        value in secret_value_strategy(),
    ) {
        let expected = format!("{base}/{segment}");
        let store = MockKvStore::new().with_secret(expected.clone(), [(name.clone(), value.clone())]);
        let mut config = StepConfig::new();
        config.set("vaultPath", format!("{base}/"));
        let params = [StepParameter::new(name.clone()).with_vault_secret("vaultPath", format!("{segment}/"))];

        let resolved = tokio_test::block_on(resolve_vault_config(&store, &config, &params)).unwrap();

        prop_assert_eq!(resolved.get(&name), Some(&ConfigValue::from(value)));
        prop_assert_eq!(tokio_test::block_on(store.calls()), vec![expected]);
    }

    /// A configured namespace is carried onto the client.
    #[test]
    fn prop_client_uses_configured_namespace(namespace in namespace_strategy()) {
        let mut config = StepConfig::new();
        config.set(VAULT_ADDRESS_KEY, "https://vault:8200");
        config.set(VAULT_ROOT_PATH_KEY, "secret");
        config.set(VAULT_TOKEN_KEY, "s.token");
        config.set(VAULT_NAMESPACE_KEY, namespace.clone());

        let client = vault_client_from_config(&config).unwrap().unwrap();

        prop_assert_eq!(client.namespace(), Some(namespace.as_str()));
    }
}
