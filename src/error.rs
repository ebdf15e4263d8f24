//! Error types for installer detection.
//!
//! This module defines [`DetectError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Detection itself never fails: probe problems degrade to the next probe
//!   or to [`Installer::Unknown`](crate::detection::Installer::Unknown)
//! - `DetectError` covers the few things that can still go wrong around it,
//!   chiefly writing the report
//! - Use `anyhow::Error` (via `DetectError::Other`) for unexpected errors

use thiserror::Error;

/// Core error type for detect-installer operations.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The environment could not be probed or the report could not be written.
    #[error("Environment probe failed: {message}")]
    EnvironmentProbeFailure {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DetectError {
    /// Build a [`DetectError::EnvironmentProbeFailure`] from an IO error.
    pub fn probe_failure(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::EnvironmentProbeFailure {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Result type alias for detect-installer operations.
pub type Result<T> = std::result::Result<T, DetectError>;
