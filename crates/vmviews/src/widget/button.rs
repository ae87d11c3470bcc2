//! Buttons.

use super::{Widget, WidgetKind};
use crate::browser::Browser;
use crate::locator::{Locator, Selector};
use crate::result::ViewResult;
use async_trait::async_trait;
use serde_json::Value;

/// Button-like element addressed by its text, value or title
#[derive(Debug, Clone)]
pub struct Button {
    locator: Locator,
}

impl Button {
    /// Button labelled (or titled) `text`
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            locator: Locator::from_selector(Selector::button(text)),
        }
    }

    /// Click the button
    pub async fn click(&self, browser: &Browser) -> ViewResult<()> {
        browser.click(&self.locator, None).await
    }

    /// False when the button carries `disabled` as attribute or class
    pub async fn is_enabled(&self, browser: &Browser) -> ViewResult<bool> {
        let element = browser.element(&self.locator, None).await?;
        let driver = browser.driver();
        if driver.attribute(&element, "disabled").await?.is_some() {
            return Ok(false);
        }
        let class = driver.attribute(&element, "class").await?.unwrap_or_default();
        Ok(!class.split_whitespace().any(|c| c == "disabled"))
    }
}

#[async_trait]
impl Widget for Button {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        Ok(Value::String(browser.text(&self.locator, None).await?))
    }
}
