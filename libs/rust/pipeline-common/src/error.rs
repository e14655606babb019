//! Centralized error types for the pipeline libraries.
//!
//! Remote backends (secret stores, scan services) share this error shape so
//! the step runner can classify failures the same way everywhere.

use thiserror::Error;

/// Common error type for platform operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP client could not be created or a request failed in transport
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Logging subscriber could not be installed
    #[error("Tracing initialization failed: {0}")]
    Tracing(String),
}

impl PlatformError {
    /// Check if this error is retryable.
    ///
    /// Only transient backend conditions count; nothing in the pipeline
    /// retries automatically, callers decide.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipeline_common::PlatformError;
    ///
    /// let err = PlatformError::unavailable("vault sealed");
    /// assert!(err.is_retryable());
    ///
    /// let err = PlatformError::invalid_input("empty address");
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Create an unavailable error with the given message.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
