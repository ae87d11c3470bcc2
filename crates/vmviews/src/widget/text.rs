//! Static text and text inputs.

use super::{value_as_text, Widget, WidgetKind};
use crate::browser::Browser;
use crate::locator::{Locator, Selector};
use crate::result::ViewResult;
use async_trait::async_trait;
use serde_json::Value;

/// Read-only text of an element
#[derive(Debug, Clone)]
pub struct Text {
    locator: Locator,
}

impl Text {
    /// Text of the element matched by `selector`
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            locator: Locator::from_selector(selector),
        }
    }

    /// Text of a CSS-located element
    #[must_use]
    pub fn css(css: &str) -> Self {
        Self::new(Selector::css(css))
    }

    /// Text of an XPath-located element
    #[must_use]
    pub fn xpath(xpath: &str) -> Self {
        Self::new(Selector::xpath(xpath))
    }

    /// Current text
    pub async fn text(&self, browser: &Browser) -> ViewResult<String> {
        browser.text(&self.locator, None).await
    }
}

#[async_trait]
impl Widget for Text {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Text
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        Ok(Value::String(self.text(browser).await?))
    }
}

/// Text input addressed by `name` or `id`
#[derive(Debug, Clone)]
pub struct TextInput {
    locator: Locator,
}

impl TextInput {
    /// Input with the given `name` attribute
    #[must_use]
    pub fn by_name(name: &str) -> Self {
        Self::new(Selector::name(name))
    }

    /// Input with the given `id` attribute
    #[must_use]
    pub fn by_id(id: &str) -> Self {
        Self::new(Selector::id(id))
    }

    /// Input matched by `selector`
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            locator: Locator::from_selector(selector),
        }
    }

    /// Current value
    pub async fn value(&self, browser: &Browser) -> ViewResult<String> {
        let element = browser.element(&self.locator, None).await?;
        browser.driver().value(&element).await
    }

    /// Replace the value when it differs; returns whether it changed
    pub async fn fill_text(&self, browser: &Browser, text: &str) -> ViewResult<bool> {
        let element = browser.element(&self.locator, None).await?;
        let driver = browser.driver();
        if driver.value(&element).await? == text {
            return Ok(false);
        }
        tracing::debug!(locator = %self.locator, "fill text input");
        driver.clear(&element).await?;
        driver.send_keys(&element, text).await?;
        Ok(true)
    }
}

#[async_trait]
impl Widget for TextInput {
    fn kind(&self) -> WidgetKind {
        WidgetKind::TextInput
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        Ok(Value::String(self.value(browser).await?))
    }

    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let text = value_as_text(&self.locator, value)?;
        self.fill_text(browser, &text).await
    }
}
