//! Result and error types for vmviews.

use thiserror::Error;

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors that can occur while driving views
#[derive(Debug, Error)]
pub enum ViewError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Driver-level failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched before the auto-wait ran out
    #[error("Element {locator} not found after {timeout_ms}ms")]
    ElementNotFound {
        /// Locator description
        locator: String,
        /// How long we waited
        timeout_ms: u64,
    },

    /// Strict locator matched several elements
    #[error("Locator {locator} matched {count} elements")]
    AmbiguousElement {
        /// Locator description
        locator: String,
        /// Number of matches
        count: usize,
    },

    /// Provisioning image row is missing
    #[error("Cannot find template \"{template}\" for provider \"{provider}\"")]
    TemplateNotFound {
        /// Template name
        template: String,
        /// Provider name
        provider: String,
    },

    /// Table row lookup failed
    #[error("No row in table {table} matching {criteria}")]
    RowNotFound {
        /// Table locator description
        table: String,
        /// Rendered criteria
        criteria: String,
    },

    /// Select, dropdown or tree item is missing
    #[error("Option {option:?} not available in {widget}")]
    OptionNotFound {
        /// Widget locator description
        widget: String,
        /// Requested option
        option: String,
    },

    /// Flash message assertion failed
    #[error("Flash assertion failed: {message}")]
    Flash {
        /// Error message
        message: String,
    },

    /// Fill value has the wrong shape for the widget
    #[error("Invalid fill value for {widget}: {message}")]
    InvalidFillValue {
        /// Widget locator description
        widget: String,
        /// Error message
        message: String,
    },

    /// Fill attempted on a read-only widget
    #[error("Widget {widget} cannot be filled")]
    ReadOnly {
        /// Widget locator description
        widget: String,
    },

    /// No version pick applies to the appliance version
    #[error("No widget defined for appliance version {version}")]
    UnsupportedVersion {
        /// Appliance version
        version: String,
    },

    /// Version string did not parse
    #[error("Invalid version string: {input:?}")]
    InvalidVersion {
        /// Offending input
        input: String,
    },

    /// No view registered under the name
    #[error("Unknown view {name:?}")]
    UnknownView {
        /// Requested name
        name: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ViewError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create an invalid fill value error
    #[must_use]
    pub fn invalid_fill(widget: impl ToString, message: impl Into<String>) -> Self {
        Self::InvalidFillValue {
            widget: widget.to_string(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for the errors produced by the auto-wait giving up
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. }
                | Self::RowNotFound { .. }
                | Self::TemplateNotFound { .. }
                | Self::OptionNotFound { .. }
        )
    }
}
