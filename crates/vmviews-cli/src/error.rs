//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Output rendering error
    #[error("Cannot render {format} output: {message}")]
    Render {
        /// Output format
        format: String,
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// vmviews library error
    #[error("{0}")]
    View(#[from] vmviews::ViewError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a rendering error
    #[must_use]
    pub fn render(format: impl ToString, message: impl ToString) -> Self {
        Self::Render {
            format: format.to_string(),
            message: message.to_string(),
        }
    }
}
