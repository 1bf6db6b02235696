//! Error types for the fallible edges of the core.
//!
//! Editing operations never fail; they are no-ops on bad input. Errors only
//! surface where text or files enter the library.

use crate::style::ValueKind;
use thiserror::Error;

/// Errors raised by the string-keyed style facade.
#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("Unknown style property: {0}")]
    UnknownKey(String),
    #[error("Style property '{key}' expects a {expected} value, got {found}")]
    TypeMismatch {
        key: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Result type for style facade operations.
pub type StyleResult<T> = Result<T, StyleError>;

/// Errors raised while reading editor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
