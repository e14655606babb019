//! Shared test utilities for piper Rust libraries.
//!
//! This crate provides:
//! - A scripted in-memory KV secret store
//! - Proptest generators for paths, parameter names and secret values
//! - Step metadata and Vault HTTP response fixtures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::MockKvStore;
