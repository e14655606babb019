//! Integration tests for piper Rust libraries live in `tests/`.
