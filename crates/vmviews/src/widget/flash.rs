//! Flash message area shown after form submissions.

use super::{Widget, WidgetKind};
use crate::browser::Browser;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Severity of a flash message, from its `alert-*` class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// `alert-success`
    Success,
    /// `alert-info`
    Info,
    /// `alert-warning`
    Warning,
    /// `alert-danger`
    Error,
}

impl FlashLevel {
    fn from_classes(classes: &str) -> Self {
        for class in classes.split_whitespace() {
            match class {
                "alert-success" => return Self::Success,
                "alert-warning" => return Self::Warning,
                "alert-danger" | "alert-error" => return Self::Error,
                _ => {}
            }
        }
        Self::Info
    }
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One flash message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Message text
    pub text: String,
    /// Severity
    pub level: FlashLevel,
}

/// Container of `div.alert` flash messages
#[derive(Debug, Clone)]
pub struct FlashMessages {
    locator: Locator,
}

impl FlashMessages {
    /// Flash area matched by `selector`
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            locator: Locator::from_selector(selector),
        }
    }

    /// Visible messages, top to bottom; empty when the area is absent
    pub async fn messages(&self, browser: &Browser) -> ViewResult<Vec<FlashMessage>> {
        let driver = browser.driver();
        let mut out = Vec::new();
        for area in browser.elements(&self.locator, None).await? {
            for alert in browser.elements(&Locator::new("div.alert"), Some(&area)).await? {
                if !driver.is_displayed(&alert).await? {
                    continue;
                }
                let classes = driver.attribute(&alert, "class").await?.unwrap_or_default();
                out.push(FlashMessage {
                    text: driver.text(&alert).await?,
                    level: FlashLevel::from_classes(&classes),
                });
            }
        }
        Ok(out)
    }

    /// Fail when any error message is shown
    pub async fn assert_no_error(&self, browser: &Browser) -> ViewResult<()> {
        let errors: Vec<String> = self
            .messages(browser)
            .await?
            .into_iter()
            .filter(|m| m.level == FlashLevel::Error)
            .map(|m| m.text)
            .collect();
        if errors.is_empty() {
            return Ok(());
        }
        Err(ViewError::Flash {
            message: format!("error messages shown: {}", errors.join("; ")),
        })
    }

    /// Fail unless a message with exactly `text` (and `level`, if given) is shown
    pub async fn assert_message(
        &self,
        browser: &Browser,
        text: &str,
        level: Option<FlashLevel>,
    ) -> ViewResult<()> {
        let messages = self.messages(browser).await?;
        if messages
            .iter()
            .any(|m| m.text == text && level.map_or(true, |l| m.level == l))
        {
            return Ok(());
        }
        let shown: Vec<String> = messages
            .iter()
            .map(|m| format!("[{}] {}", m.level, m.text))
            .collect();
        Err(ViewError::Flash {
            message: format!("{text:?} not among [{}]", shown.join(", ")),
        })
    }

    /// [`Self::assert_message`] at success level
    pub async fn assert_success_message(&self, browser: &Browser, text: &str) -> ViewResult<()> {
        self.assert_message(browser, text, Some(FlashLevel::Success)).await
    }
}

#[async_trait]
impl Widget for FlashMessages {
    fn kind(&self) -> WidgetKind {
        WidgetKind::FlashMessages
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        Ok(serde_json::to_value(self.messages(browser).await?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement};
    use crate::widget::testing::browser;
    use serde_json::json;
    use std::sync::Arc;

    fn flash_area(driver: &MockDriver, alerts: &[(&str, &str)]) {
        let area = driver.add_root(MockElement::new("div").id("flash_text_div"));
        for (class, text) in alerts {
            let alert = driver.add_child(area, MockElement::new("div").class("alert").class(class));
            let _ = driver.add_child(alert, MockElement::new("span").class("pficon"));
            let _ = driver.add_child(alert, MockElement::new("strong").text(*text));
        }
    }

    fn flash() -> FlashMessages {
        FlashMessages::new(Selector::id("flash_text_div"))
    }

    #[test]
    fn test_level_from_classes() {
        assert_eq!(FlashLevel::from_classes("alert alert-success"), FlashLevel::Success);
        assert_eq!(FlashLevel::from_classes("alert alert-danger"), FlashLevel::Error);
        assert_eq!(FlashLevel::from_classes("alert"), FlashLevel::Info);
    }

    #[tokio::test]
    async fn test_messages_and_read() {
        let driver = Arc::new(MockDriver::new());
        flash_area(
            &driver,
            &[
                ("alert-success", "Retirement date set"),
                ("alert-warning", "Snapshot is stale"),
            ],
        );
        let browser = browser(&driver);
        let messages = flash().messages(&browser).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].level, FlashLevel::Warning);

        let value = flash().read(&browser).await.unwrap();
        assert_eq!(
            value[0],
            json!({"text": "Retirement date set", "level": "success"})
        );
    }

    #[tokio::test]
    async fn test_absent_area_has_no_messages() {
        let driver = Arc::new(MockDriver::new());
        let browser = browser(&driver);
        assert!(flash().messages(&browser).await.unwrap().is_empty());
        assert!(flash().assert_no_error(&browser).await.is_ok());
    }

    #[tokio::test]
    async fn test_assert_no_error() {
        let driver = Arc::new(MockDriver::new());
        flash_area(&driver, &[("alert-danger", "Unable to save")]);
        let browser = browser(&driver);
        let err = flash().assert_no_error(&browser).await.unwrap_err();
        assert!(err.to_string().contains("Unable to save"));
    }

    #[tokio::test]
    async fn test_assert_message() {
        let driver = Arc::new(MockDriver::new());
        flash_area(&driver, &[("alert-success", "Ownership saved")]);
        let browser = browser(&driver);
        assert!(flash().assert_success_message(&browser, "Ownership saved").await.is_ok());
        assert!(flash()
            .assert_message(&browser, "Ownership saved", Some(FlashLevel::Error))
            .await
            .is_err());
        assert!(flash().assert_message(&browser, "Other", None).await.is_err());
    }
}
