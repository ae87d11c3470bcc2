//! Session configuration.

use crate::locator::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use crate::result::{ViewError, ViewResult};
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default pause after picking a provisioning image (3 seconds)
pub const DEFAULT_TEMPLATE_SETTLE_MS: u64 = 3000;

/// Configuration shared by every view of a browser session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Appliance base URL; relative navigation is joined onto it
    pub base_url: String,
    /// Appliance version used for widget picks
    pub appliance_version: Version,
    /// Auto-wait timeout for locators without their own
    pub default_timeout_ms: u64,
    /// Auto-wait polling interval
    pub poll_interval_ms: u64,
    /// Pause after the provisioning image selection
    pub template_settle_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost".to_string(),
            appliance_version: Version::latest(),
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            template_settle_ms: DEFAULT_TEMPLATE_SETTLE_MS,
        }
    }
}

impl ViewConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> ViewResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> ViewResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading view config");
        Self::from_yaml_str(&text)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> ViewResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> ViewResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(ViewError::config("poll_interval_ms must be greater than zero"));
        }
        if self.poll_interval_ms > self.default_timeout_ms {
            return Err(ViewError::config(format!(
                "poll_interval_ms ({}) exceeds default_timeout_ms ({})",
                self.poll_interval_ms, self.default_timeout_ms
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(ViewError::config("base_url must not be empty"));
        }
        Ok(())
    }

    /// Set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set appliance version
    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.appliance_version = version;
        self
    }

    /// Set default auto-wait timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.default_timeout_ms = ms;
        self
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the post image-selection pause
    #[must_use]
    pub const fn with_template_settle_ms(mut self, ms: u64) -> Self {
        self.template_settle_ms = ms;
        self
    }

    /// Default timeout as a duration
    #[must_use]
    pub const fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Polling interval as a duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Settle pause as a duration
    #[must_use]
    pub const fn template_settle(&self) -> Duration {
        Duration::from_millis(self.template_settle_ms)
    }

    /// Join a path onto the base URL; absolute URLs pass through
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
