//! Core error types for rejection-core.
//!
//! Validation failures are recoverable and never leave a store partially
//! mutated. Unknown ids on toggle/delete are not errors at all; the stores
//! treat them as no-ops.

use std::path::PathBuf;
use thiserror::Error;

use crate::draft::FieldName;

/// Core error type for rejection-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Errors produced while staging or submitting a draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty
    #[error("'{field}' is required")]
    MissingField { field: FieldName },

    /// Difficulty text is not one of Easy, Medium, Hard
    #[error("Invalid difficulty '{0}': expected Easy, Medium or Hard")]
    InvalidDifficulty(String),

    /// Field name does not exist on a draft
    #[error("Unknown field '{0}': expected title, description, category or difficulty")]
    UnknownField(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
