//! HashiCorp Vault KV client for piper pipeline steps.
//!
//! Reads flat key/value secrets from KV v1 and v2 engines. The
//! [`KvSecretReader`] trait is the seam callers depend on so tests can swap
//! in scripted stores.

pub mod client;
pub mod config;
pub mod error;
pub mod path;
pub mod provider;
pub mod secrets;

pub use client::VaultClient;
pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use path::join_path;
pub use provider::{KvSecret, KvSecretReader};
