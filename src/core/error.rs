//! Error types for gitparator

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gitparator operations
#[derive(Error, Debug)]
pub enum GitparatorError {
    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Tree-related errors
    #[error("Target path does not exist: {path}")]
    TargetNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Remote checkout errors
    #[error("Failed to clone {url}: {reason}")]
    CloneFailed { url: String, reason: String },

    /// Report errors
    #[error("Failed to write report {path}: {reason}")]
    ReportFailed { path: PathBuf, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Generic error for unexpected conditions
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GitparatorError {
    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Create a new target not found error
    pub fn target_not_found(path: PathBuf) -> Self {
        Self::TargetNotFound { path }
    }

    /// Create a new clone failure
    pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CloneFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type alias for gitparator operations
pub type Result<T> = std::result::Result<T, GitparatorError>;
