//! ViewDriver - abstract browser seam for views and widgets.
//!
//! Widgets never talk to a browser directly. They go through
//! [`ViewDriver`], which exposes a small element-level API in the style of
//! WebDriver. Two implementations ship with the crate:
//!
//! - [`MockDriver`](crate::mock::MockDriver) - in-memory DOM for unit tests
//! - `ChromiumDriver` - CDP via chromiumoxide (feature `browser`)

use crate::locator::Selector;
use crate::result::ViewResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Driver-assigned reference to a DOM element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Unique identifier for the element
    pub id: String,
    /// Element tag name (lower case)
    pub tag_name: String,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
        }
    }
}

/// Element-level browser operations used by widgets.
///
/// All methods take `&self`; implementations use interior mutability so a
/// single driver can be shared by every view of a session.
#[async_trait]
pub trait ViewDriver: Send + Sync + std::fmt::Debug {
    /// Navigate to URL
    async fn navigate(&self, url: &str) -> ViewResult<()>;

    /// Get current URL
    async fn current_url(&self) -> ViewResult<String>;

    /// Find every element matching `selector`, below `scope` when given
    async fn find_elements(
        &self,
        selector: &Selector,
        scope: Option<&ElementHandle>,
    ) -> ViewResult<Vec<ElementHandle>>;

    /// Whether the element is rendered and visible
    async fn is_displayed(&self, element: &ElementHandle) -> ViewResult<bool>;

    /// Trimmed text content
    async fn text(&self, element: &ElementHandle) -> ViewResult<String>;

    /// Attribute value, `None` when absent
    async fn attribute(&self, element: &ElementHandle, name: &str)
        -> ViewResult<Option<String>>;

    /// Current form value
    async fn value(&self, element: &ElementHandle) -> ViewResult<String>;

    /// Checked/selected state of checkboxes, radios and options
    async fn is_selected(&self, element: &ElementHandle) -> ViewResult<bool>;

    /// Click element
    async fn click(&self, element: &ElementHandle) -> ViewResult<()>;

    /// Clear a form field
    async fn clear(&self, element: &ElementHandle) -> ViewResult<()>;

    /// Type text into element
    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ViewResult<()>;
}

/// Browser configuration for drivers that launch a real browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Timeout for navigation
    #[serde(with = "millis")]
    pub navigation_timeout: Duration,
    /// Executable path override
    pub executable_path: Option<String>,
    /// Run with the Chromium sandbox
    pub sandbox: bool,
    /// Accept self-signed certificates (appliances usually ship one)
    pub ignore_https_errors: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            navigation_timeout: Duration::from_secs(30),
            executable_path: None,
            sandbox: true,
            ignore_https_errors: true,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set navigation timeout
    #[must_use]
    pub const fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set the browser executable
    #[must_use]
    pub fn executable_path(mut self, path: impl Into<String>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Enable or disable the sandbox
    #[must_use]
    pub const fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }
}

pub(crate) mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
