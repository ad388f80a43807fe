//! Custom error types for Capture-Veil

use super::ErrorCode;
use thiserror::Error;

/// Failure of a single OS capability call
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{operation} failed: {code}")]
pub struct OsError {
    pub operation: &'static str,
    pub code: ErrorCode,
}

impl OsError {
    /// Creates an OS error for the named operation
    pub fn new(operation: &'static str, code: impl Into<ErrorCode>) -> Self {
        OsError {
            operation,
            code: code.into(),
        }
    }

    /// Shorthand for an access-denied failure
    pub fn access_denied(operation: &'static str) -> Self {
        Self::new(operation, ErrorCode::AccessDenied)
    }
}

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum VeilError {
    #[error("Administrator privileges required")]
    ElevationRequired,

    #[error("Invalid target process name: {0}")]
    InvalidTarget(String),

    #[error("Invalid OS version: {0}")]
    InvalidVersion(String),

    #[error("Unknown hiding strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Result type alias for crate operations
pub type VeilResult<T> = Result<T, VeilError>;
