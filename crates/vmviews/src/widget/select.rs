//! Bootstrap selects and toolbar dropdowns.

use super::{value_as_text_list, Widget, WidgetKind};
use crate::browser::Browser;
use crate::driver::ElementHandle;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use serde_json::Value;

/// Bootstrap-select control wrapping a hidden `<select id=…>`
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    id: String,
    locator: Locator,
}

impl BootstrapSelect {
    /// Select wrapping the `<select>` with the given id
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            locator: Locator::from_selector(Selector::xpath(format!(
                "//div[contains(@class, \"bootstrap-select\") and ./select[@id=\"{id}\"]]"
            ))),
        }
    }

    /// Id of the wrapped `<select>`
    #[must_use]
    pub fn select_id(&self) -> &str {
        &self.id
    }

    fn toggle() -> Locator {
        Locator::new("button.dropdown-toggle")
    }

    fn option(text: &str) -> Locator {
        Locator::from_selector(Selector::css_with_text("li a", text))
    }

    async fn root(&self, browser: &Browser) -> ViewResult<ElementHandle> {
        browser.element(&self.locator, None).await
    }

    async fn is_multiple(&self, browser: &Browser, root: &ElementHandle) -> ViewResult<bool> {
        let select = Locator::new("select").with_visible(false);
        for handle in browser.elements(&select, Some(root)).await? {
            if browser.driver().attribute(&handle, "multiple").await?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Texts of every option in the menu
    pub async fn all_options(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        let root = self.root(browser).await?;
        let mut out = Vec::new();
        for item in browser.elements(&Locator::new("li a"), Some(&root)).await? {
            out.push(browser.driver().text(&item).await?);
        }
        Ok(out)
    }

    /// Texts of the selected options
    pub async fn selected_options(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        let root = self.root(browser).await?;
        let driver = browser.driver();
        if self.is_multiple(browser, &root).await? {
            let options = Locator::new("select option").with_visible(false);
            let mut out = Vec::new();
            for option in browser.elements(&options, Some(&root)).await? {
                if driver.is_selected(&option).await? {
                    out.push(driver.text(&option).await?);
                }
            }
            return Ok(out);
        }
        let label = browser
            .text(&Locator::new("button.dropdown-toggle .filter-option"), Some(&root))
            .await?;
        Ok(vec![label])
    }

    /// Pick `options`; returns whether anything changed
    pub async fn select(&self, browser: &Browser, options: &[String]) -> ViewResult<bool> {
        let root = self.root(browser).await?;
        let selected = self.selected_options(browser).await?;
        let pending: Vec<&String> = options.iter().filter(|o| !selected.contains(o)).collect();
        if pending.is_empty() {
            return Ok(false);
        }

        let multiple = self.is_multiple(browser, &root).await?;
        for option in pending {
            browser.click(&Self::toggle(), Some(&root)).await?;
            let item = browser
                .elements(&Self::option(option), Some(&root))
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| ViewError::OptionNotFound {
                    widget: format!("select#{}", self.id),
                    option: option.clone(),
                })?;
            tracing::debug!(select = %self.id, %option, "select option");
            browser.driver().click(&item).await?;
            if multiple {
                // multi-selects keep the menu open
                browser.click(&Self::toggle(), Some(&root)).await?;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl Widget for BootstrapSelect {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Select
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        let root = self.root(browser).await?;
        let mut selected = self.selected_options(browser).await?;
        if self.is_multiple(browser, &root).await? {
            return Ok(Value::from(selected));
        }
        Ok(Value::String(selected.pop().unwrap_or_default()))
    }

    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let options = value_as_text_list(&self.locator, value)?;
        self.select(browser, &options).await
    }
}

/// Toolbar dropdown identified by its button text
#[derive(Debug, Clone)]
pub struct Dropdown {
    text: String,
    locator: Locator,
}

impl Dropdown {
    /// Dropdown whose toggle button reads `text`
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            locator: Locator::from_selector(Selector::xpath(format!(
                "//div[contains(@class, \"dropdown\") and ./button[normalize-space(.)=\"{text}\"]]"
            ))),
        }
    }

    /// Button text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn button() -> Locator {
        Locator::new("button")
    }

    fn menu_items() -> Locator {
        Locator::new("ul.dropdown-menu li a").with_visible(false)
    }

    /// False when the toggle button is disabled
    pub async fn is_enabled(&self, browser: &Browser) -> ViewResult<bool> {
        let root = browser.element(&self.locator, None).await?;
        let button = browser.element(&Self::button(), Some(&root)).await?;
        let driver = browser.driver();
        let class = driver.attribute(&button, "class").await?.unwrap_or_default();
        Ok(driver.attribute(&button, "disabled").await?.is_none()
            && !class.split_whitespace().any(|c| c == "disabled"))
    }

    /// Menu item texts
    pub async fn items(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        let root = browser.element(&self.locator, None).await?;
        let mut out = Vec::new();
        for item in browser.elements(&Self::menu_items(), Some(&root)).await? {
            out.push(browser.driver().text(&item).await?);
        }
        Ok(out)
    }

    /// Whether `item` is in the menu
    pub async fn has_item(&self, browser: &Browser, item: &str) -> ViewResult<bool> {
        Ok(self.items(browser).await?.iter().any(|i| i == item))
    }

    /// Open the menu and click `item`
    pub async fn item_select(&self, browser: &Browser, item: &str) -> ViewResult<()> {
        let root = browser.element(&self.locator, None).await?;
        browser.click(&Self::button(), Some(&root)).await?;
        let target = Locator::from_selector(Selector::css_with_text("ul.dropdown-menu li a", item));
        let handle = browser
            .elements(&target, Some(&root))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ViewError::OptionNotFound {
                widget: format!("dropdown {:?}", self.text),
                option: item.to_string(),
            })?;
        tracing::debug!(dropdown = %self.text, %item, "dropdown select");
        browser.driver().click(&handle).await
    }
}

#[async_trait]
impl Widget for Dropdown {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Dropdown
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, _browser: &Browser) -> ViewResult<Value> {
        Ok(Value::String(self.text.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement, NodeId};
    use crate::widget::testing::browser;
    use serde_json::json;
    use std::sync::Arc;

    mod bootstrap_select_tests {
        use super::*;

        struct Fixture {
            toggle: NodeId,
            items: Vec<NodeId>,
        }

        fn bootstrap_select(
            driver: &MockDriver,
            id: &str,
            options: &[&str],
            current: &str,
        ) -> Fixture {
            let root = driver.add_root(
                MockElement::new("div")
                    .class("btn-group")
                    .class("bootstrap-select"),
            );
            driver.alias(BootstrapSelect::new(id).locator().selector(), root);
            let toggle = driver.add_child(
                root,
                MockElement::new("button").class("dropdown-toggle").attr("data-id", id),
            );
            let _ = driver.add_child(
                toggle,
                MockElement::new("span").class("filter-option").text(current),
            );
            let menu = driver.add_child(root, MockElement::new("ul").class("dropdown-menu"));
            let items = options
                .iter()
                .map(|o| {
                    let li = driver.add_child(menu, MockElement::new("li"));
                    driver.add_child(li, MockElement::new("a").text(*o))
                })
                .collect();
            let select = driver.add_child(root, MockElement::new("select").id(id).hidden());
            for o in options {
                let _ = driver.add_child(
                    select,
                    MockElement::new("option").text(*o).checked(*o == current),
                );
            }
            Fixture { toggle, items }
        }

        #[tokio::test]
        async fn test_read_selected() {
            let driver = Arc::new(MockDriver::new());
            let _ = bootstrap_select(&driver, "hardware__number_of_sockets", &["1", "2", "4"], "1");
            let browser = browser(&driver);
            let sockets = BootstrapSelect::new("hardware__number_of_sockets");
            assert_eq!(sockets.read(&browser).await.unwrap(), json!("1"));
            assert_eq!(sockets.all_options(&browser).await.unwrap(), vec!["1", "2", "4"]);
        }

        #[tokio::test]
        async fn test_fill_opens_menu_and_clicks_item() {
            let driver = Arc::new(MockDriver::new());
            let fx = bootstrap_select(&driver, "hardware__vm_memory", &["1024", "2048"], "1024");
            let browser = browser(&driver);
            let memory = BootstrapSelect::new("hardware__vm_memory");

            assert!(memory.fill(&browser, &json!("2048")).await.unwrap());
            assert_eq!(driver.clicks_on(fx.toggle), 1);
            assert_eq!(driver.clicks_on(fx.items[1]), 1);
        }

        #[tokio::test]
        async fn test_fill_current_value_is_noop() {
            let driver = Arc::new(MockDriver::new());
            let fx = bootstrap_select(&driver, "network__vlan", &["VM Network"], "VM Network");
            let browser = browser(&driver);
            assert!(!BootstrapSelect::new("network__vlan")
                .fill(&browser, &json!("VM Network"))
                .await
                .unwrap());
            assert_eq!(driver.clicks_on(fx.toggle), 0);
        }

        #[tokio::test]
        async fn test_fill_number_value() {
            let driver = Arc::new(MockDriver::new());
            let fx = bootstrap_select(&driver, "service__number_of_vms", &["1", "2", "3"], "1");
            let browser = browser(&driver);
            assert!(BootstrapSelect::new("service__number_of_vms")
                .fill(&browser, &json!(3))
                .await
                .unwrap());
            assert_eq!(driver.clicks_on(fx.items[2]), 1);
        }

        #[tokio::test]
        async fn test_fill_missing_option() {
            let driver = Arc::new(MockDriver::new());
            let _ = bootstrap_select(&driver, "user_name", &["Administrator"], "<Choose>");
            let browser = browser(&driver);
            let err = BootstrapSelect::new("user_name")
                .fill(&browser, &json!("nobody"))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ViewError::OptionNotFound { ref option, .. } if option == "nobody"
            ));
        }
    }

    mod dropdown_tests {
        use super::*;

        fn dropdown(driver: &MockDriver, text: &str, items: &[&str]) -> (NodeId, Vec<NodeId>) {
            let root =
                driver.add_root(MockElement::new("div").class("btn-group").class("dropdown"));
            driver.alias(Dropdown::new(text).locator().selector(), root);
            let button = driver.add_child(root, MockElement::new("button").class("btn").text(text));
            let menu = driver.add_child(root, MockElement::new("ul").class("dropdown-menu"));
            let nodes = items
                .iter()
                .map(|i| {
                    let li = driver.add_child(menu, MockElement::new("li"));
                    driver.add_child(li, MockElement::new("a").text(*i))
                })
                .collect();
            (button, nodes)
        }

        #[tokio::test]
        async fn test_items_and_has_item() {
            let driver = Arc::new(MockDriver::new());
            let _ = dropdown(&driver, "Lifecycle", &["Provision VMs", "Retire selected items"]);
            let browser = browser(&driver);
            let lifecycle = Dropdown::new("Lifecycle");
            assert_eq!(
                lifecycle.items(&browser).await.unwrap(),
                vec!["Provision VMs", "Retire selected items"]
            );
            assert!(lifecycle.has_item(&browser, "Provision VMs").await.unwrap());
            assert!(lifecycle.is_enabled(&browser).await.unwrap());
        }

        #[tokio::test]
        async fn test_item_select_clicks_button_then_item() {
            let driver = Arc::new(MockDriver::new());
            let (button, items) = dropdown(&driver, "Power Operations", &["Power On", "Power Off"]);
            let browser = browser(&driver);

            Dropdown::new("Power Operations")
                .item_select(&browser, "Power Off")
                .await
                .unwrap();
            assert_eq!(driver.clicks_on(button), 1);
            assert_eq!(driver.clicks_on(items[1]), 1);
            let history = driver.history();
            assert!(history[0].ends_with(&format!("mock-{button}")));
        }

        #[tokio::test]
        async fn test_item_select_unknown() {
            let driver = Arc::new(MockDriver::new());
            let _ = dropdown(&driver, "Policy", &["Manage Policies"]);
            let browser = browser(&driver);
            let err = Dropdown::new("Policy")
                .item_select(&browser, "Edit Tags")
                .await
                .unwrap_err();
            assert!(matches!(err, ViewError::OptionNotFound { .. }));
        }
    }
}
