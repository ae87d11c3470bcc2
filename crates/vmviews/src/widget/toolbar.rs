//! Grid/tile/list view switcher on item toolbars.

use super::{value_as_text, Widget, WidgetKind};
use crate::browser::Browser;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use serde_json::Value;

/// Button group selecting how collection items are shown
#[derive(Debug, Clone)]
pub struct ViewSelector {
    locator: Locator,
}

impl Default for ViewSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSelector {
    /// Selector in the toolbar's `toolbar-pf-view-selector` group
    #[must_use]
    pub fn new() -> Self {
        Self {
            locator: Locator::from_selector(Selector::css("div.toolbar-pf-view-selector")),
        }
    }

    /// Titles of the available modes
    pub async fn modes(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        let root = browser.element(&self.locator, None).await?;
        let mut out = Vec::new();
        for button in browser.elements(&Locator::new("button"), Some(&root)).await? {
            if let Some(title) = browser.driver().attribute(&button, "title").await? {
                out.push(title);
            }
        }
        Ok(out)
    }

    /// Title of the active mode
    pub async fn selected(&self, browser: &Browser) -> ViewResult<Option<String>> {
        let root = browser.element(&self.locator, None).await?;
        let active = browser
            .elements(&Locator::new("button.active"), Some(&root))
            .await?;
        match active.first() {
            Some(button) => browser.driver().attribute(button, "title").await,
            None => Ok(None),
        }
    }

    /// Switch to the mode titled `title`; returns whether it changed
    pub async fn select(&self, browser: &Browser, title: &str) -> ViewResult<bool> {
        if self.selected(browser).await?.as_deref() == Some(title) {
            return Ok(false);
        }
        let root = browser.element(&self.locator, None).await?;
        let button = Locator::from_selector(Selector::title(title));
        let found = browser.elements(&button, Some(&root)).await?;
        let handle = found.first().ok_or_else(|| ViewError::OptionNotFound {
            widget: self.locator.to_string(),
            option: title.to_string(),
        })?;
        tracing::debug!(mode = %title, "switch item view");
        browser.driver().click(handle).await?;
        Ok(true)
    }
}

#[async_trait]
impl Widget for ViewSelector {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ViewSelector
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        Ok(self.selected(browser).await?.map_or(Value::Null, Value::String))
    }

    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let title = value_as_text(&self.locator, value)?;
        self.select(browser, &title).await
    }
}
