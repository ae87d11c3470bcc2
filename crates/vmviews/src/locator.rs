//! Locator abstraction for element selection.
//!
//! A [`Locator`] pairs a [`Selector`] with auto-wait options. Locators are
//! plain data: resolving them against a page is the job of
//! [`Browser`](crate::Browser), which polls the driver until a match shows up
//! or the timeout runs out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Elements that count as buttons for [`Selector::Button`]
const BUTTON_LIKE_CSS: &str = "button, a.btn, input[type=\"button\"], input[type=\"submit\"]";

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Selector {
    /// CSS selector (e.g., "ul.nav-tabs li a")
    Css(String),
    /// XPath expression
    XPath(String),
    /// `id` attribute
    Id(String),
    /// `name` attribute
    Name(String),
    /// `title` attribute
    Title(String),
    /// Exact (trimmed) text content
    Text(String),
    /// CSS selector filtered by exact (trimmed) text content
    CssWithText {
        /// Base CSS selector
        css: String,
        /// Text content to match
        text: String,
    },
    /// Button-like element whose text, value or title matches
    Button(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a name selector
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Create a title selector
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self::Title(title.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a CSS selector filtered by text
    #[must_use]
    pub fn css_with_text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self::CssWithText {
            css: css.into(),
            text: text.into(),
        }
    }

    /// Create a button selector
    #[must_use]
    pub fn button(text: impl Into<String>) -> Self {
        Self::Button(text.into())
    }

    /// Convert to a JavaScript expression yielding an array of matching
    /// elements below the element bound to `root`.
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(root.querySelectorAll({}))", js_str(s)),
            Self::XPath(s) => format!(
                "(() => {{ const r = document.evaluate({}, root, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 return Array.from({{ length: r.snapshotLength }}, (_, i) => r.snapshotItem(i)); }})()",
                js_str(s)
            ),
            Self::Id(v) => attribute_query("id", v),
            Self::Name(v) => attribute_query("name", v),
            Self::Title(v) => attribute_query("title", v),
            Self::Text(t) => format!(
                "Array.from(root.querySelectorAll('*')).filter(el => el.textContent.trim() === {})",
                js_str(t)
            ),
            Self::CssWithText { css, text } => format!(
                "Array.from(root.querySelectorAll({})).filter(el => el.textContent.trim() === {})",
                js_str(css),
                js_str(text)
            ),
            Self::Button(t) => format!(
                "Array.from(root.querySelectorAll({})).filter(el => [el.textContent.trim(), el.value, el.title].includes({}))",
                js_str(BUTTON_LIKE_CSS),
                js_str(t)
            ),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Id(s) => write!(f, "id={s}"),
            Self::Name(s) => write!(f, "name={s}"),
            Self::Title(s) => write!(f, "title={s}"),
            Self::Text(s) => write!(f, "text={s}"),
            Self::CssWithText { css, text } => write!(f, "css={css} text={text}"),
            Self::Button(s) => write!(f, "button={s}"),
        }
    }
}

fn attribute_query(attr: &str, value: &str) -> String {
    let css = format!("[{attr}={}]", js_str(value));
    format!("Array.from(root.querySelectorAll({}))", js_str(&css))
}

/// Render a JavaScript string literal
pub(crate) fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Locator options for customizing behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting; `None` uses the session default
    pub timeout: Option<Duration>,
    /// Polling interval for auto-waiting; `None` uses the session default
    pub poll_interval: Option<Duration>,
    /// Whether to require strict single-element match
    pub strict: bool,
    /// Whether the element must be visible
    pub visible: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: None,
            strict: false,
            visible: true,
        }
    }
}

/// A locator for finding elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Set a custom timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Set a custom polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = Some(interval);
        self
    }

    /// Require exactly one match
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Set visibility requirement
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.options.visible = visible;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::from_selector(selector)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}
