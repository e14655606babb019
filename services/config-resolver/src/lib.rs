//! Step configuration resolver.
//!
//! Loads a step's configuration and metadata, applies command line input and
//! fills the remaining secret parameters from Vault.

pub mod cli;
pub mod resolve;

pub use cli::{Cli, VaultArgs};
pub use resolve::{Resolution, resolve};
