//! Error types for tunable loading.

use thiserror::Error;

/// Errors that can occur when loading or validating mode tunables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Values parsed but cannot drive a game.
    #[error("Invalid {section} tunables: {reason}")]
    Invalid { section: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(section: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            section,
            reason: reason.into(),
        }
    }
}
