//! Chrome shared by every screen after login.

use crate::browser::Browser;
use crate::locator::Selector;
use crate::result::ViewResult;
use crate::view::{children, Child, View};
use crate::widget::{FlashMessages, Text, Widget};
use async_trait::async_trait;

/// Flash area below the page title
pub const FLASH_XPATH: &str = ".//div[@id=\"flash_msg_div\"]\
    /div[@id=\"flash_text_div\" or contains(@class, \"flash_text_div\")]";

/// User menu toggle in the navigation bar
pub const LOGGED_IN_AS_XPATH: &str =
    "//nav//li[contains(@class, \"dropdown\")]/a[@id=\"dropdownMenu2\"]";

/// Page after login: flash messages and the user menu
#[derive(Debug)]
pub struct LoggedInPage {
    /// Flash messages
    pub flash: FlashMessages,
    /// Name in the user menu
    pub logged_in_as: Text,
}

impl Default for LoggedInPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggedInPage {
    /// Create the shared page chrome
    #[must_use]
    pub fn new() -> Self {
        Self {
            flash: FlashMessages::new(Selector::xpath(FLASH_XPATH)),
            logged_in_as: Text::xpath(LOGGED_IN_AS_XPATH),
        }
    }

    /// Full name of the logged-in user
    pub async fn logged_in_as_user(&self, browser: &Browser) -> ViewResult<String> {
        self.logged_in_as.text(browser).await
    }

    /// True when the user menu is shown
    pub async fn is_logged_in(&self, browser: &Browser) -> ViewResult<bool> {
        self.logged_in_as.is_displayed(browser).await
    }
}

#[async_trait]
impl View for LoggedInPage {
    fn view_name(&self) -> &str {
        "logged_in_page"
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        children![self; Widget flash, Widget logged_in_as]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement};
    use crate::widget::testing::browser;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_logged_in_user() {
        let driver = Arc::new(MockDriver::new());
        let nav = driver.add_root(MockElement::new("nav"));
        let menu = driver.add_child(
            nav,
            MockElement::new("a").id("dropdownMenu2").text(" Administrator "),
        );
        driver.alias(&Selector::xpath(LOGGED_IN_AS_XPATH), menu);
        driver.alias(&Selector::xpath(FLASH_XPATH), nav);
        let browser = browser(&driver);

        let page = LoggedInPage::new();
        assert!(page.is_logged_in(&browser).await.unwrap());
        assert_eq!(page.logged_in_as_user(&browser).await.unwrap(), "Administrator");
        let value = page.read(&browser).await.unwrap();
        assert_eq!(value["logged_in_as"], json!("Administrator"));
        assert_eq!(value["flash"], json!([]));
    }

    #[test]
    fn test_describe() {
        let outline = LoggedInPage::new().describe();
        assert_eq!(outline.children.len(), 2);
        assert!(outline.find("flash").is_some());
    }
}
