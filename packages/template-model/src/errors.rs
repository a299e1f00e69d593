//! Error types for template-model
//!
//! Malformed template text is never an error here: trees, values, contexts
//! and entities degrade to empty or partial results. What remains are backend
//! failures that leave a format unusable, plus configuration problems.

use crate::config::ConfigError;
use crate::shared::models::DocumentFormat;
use thiserror::Error;

/// Failure to obtain portable grammar bytes or turn them into a language
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarLoadError {
    #[error("grammar asset not found: {0}")]
    NotFound(String),

    #[error("grammar asset could not be read: {0}")]
    Io(String),

    #[error("portable runtime rejected grammar: {0}")]
    Runtime(String),
}

impl From<std::io::Error> for GrammarLoadError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => GrammarLoadError::NotFound(err.to_string()),
            _ => GrammarLoadError::Io(err.to_string()),
        }
    }
}

/// Parser backend errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// Native grammars failed and there is no portable backend to fall back to
    #[error("no parser backend available for {format}: {reason}")]
    Unavailable {
        format: DocumentFormat,
        reason: String,
    },

    /// Portable grammar is still loading
    #[error("{format} grammar is still loading")]
    NotReady { format: DocumentFormat },

    /// Portable grammar failed permanently; not retried until restart
    #[error("{format} grammar failed to load after {attempts} attempt(s): {reason}")]
    LoadFailed {
        format: DocumentFormat,
        attempts: u32,
        reason: GrammarLoadError,
    },

    /// Provider was disposed
    #[error("parser provider has been disposed")]
    Disposed,

    /// Language could not be installed on a parser
    #[error("language error: {0}")]
    Language(String),
}

/// Main error type for template-model operations
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for template-model operations
pub type Result<T> = std::result::Result<T, ModelError>;
