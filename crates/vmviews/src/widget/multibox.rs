//! Available/chosen dual list boxes.

use super::{value_as_text_list, Widget, WidgetKind};
use crate::browser::Browser;
use crate::driver::ElementHandle;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use serde_json::Value;

const AVAILABLE: &str = "select[id$=\"available\"] option";
const CHOSEN: &str = "select[id$=\"chosen\"] option";
const MOVE_RIGHT: &str = "button[title*=\"right\"]";
const MOVE_LEFT: &str = "button[title*=\"left\"]";

/// Two `<select multiple>` lists with buttons moving items between them
#[derive(Debug, Clone)]
pub struct MultiBoxSelect {
    locator: Locator,
}

impl MultiBoxSelect {
    /// Dual list inside the container with the given id
    #[must_use]
    pub fn by_id(id: &str) -> Self {
        Self {
            locator: Locator::from_selector(Selector::id(id)),
        }
    }

    async fn options(
        &self,
        browser: &Browser,
        root: &ElementHandle,
        css: &str,
    ) -> ViewResult<Vec<(String, ElementHandle)>> {
        let mut out = Vec::new();
        for option in browser.elements(&Locator::new(css), Some(root)).await? {
            out.push((browser.driver().text(&option).await?, option));
        }
        Ok(out)
    }

    /// Items in the left list
    pub async fn available(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        let root = browser.element(&self.locator, None).await?;
        let options = self.options(browser, &root, AVAILABLE).await?;
        Ok(options.into_iter().map(|(t, _)| t).collect())
    }

    /// Items in the right list
    pub async fn chosen(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        let root = browser.element(&self.locator, None).await?;
        let options = self.options(browser, &root, CHOSEN).await?;
        Ok(options.into_iter().map(|(t, _)| t).collect())
    }

    async fn move_item(
        &self,
        browser: &Browser,
        root: &ElementHandle,
        option: &ElementHandle,
        button: &str,
    ) -> ViewResult<()> {
        browser.driver().click(option).await?;
        browser.click(&Locator::new(button), Some(root)).await
    }
}

#[async_trait]
impl Widget for MultiBoxSelect {
    fn kind(&self) -> WidgetKind {
        WidgetKind::MultiBoxSelect
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        Ok(Value::from(self.chosen(browser).await?))
    }

    /// Makes the chosen list exactly the given items
    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let wanted = value_as_text_list(&self.locator, value)?;
        let root = browser.element(&self.locator, None).await?;
        let available = self.options(browser, &root, AVAILABLE).await?;
        let chosen = self.options(browser, &root, CHOSEN).await?;

        let mut changed = false;
        for item in &wanted {
            if chosen.iter().any(|(t, _)| t == item) {
                continue;
            }
            let (_, option) = available.iter().find(|(t, _)| t == item).ok_or_else(|| {
                ViewError::OptionNotFound {
                    widget: self.locator.to_string(),
                    option: item.clone(),
                }
            })?;
            tracing::debug!(%item, "move to chosen");
            self.move_item(browser, &root, option, MOVE_RIGHT).await?;
            changed = true;
        }
        for (item, option) in &chosen {
            if wanted.contains(item) {
                continue;
            }
            tracing::debug!(%item, "move to available");
            self.move_item(browser, &root, option, MOVE_LEFT).await?;
            changed = true;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement, NodeId};
    use crate::widget::testing::browser;
    use serde_json::json;
    use std::sync::Arc;

    struct Fixture {
        available: Vec<NodeId>,
        chosen: Vec<NodeId>,
        right: NodeId,
        left: NodeId,
    }

    fn list(driver: &MockDriver, root: NodeId, suffix: &str, items: &[&str]) -> Vec<NodeId> {
        let select = driver.add_child(
            root,
            MockElement::new("select").id(format!("kids_{suffix}")).attr("multiple", ""),
        );
        items
            .iter()
            .map(|i| driver.add_child(select, MockElement::new("option").text(*i)))
            .collect()
    }

    fn child_vms(driver: &MockDriver, available: &[&str], chosen: &[&str]) -> Fixture {
        let root = driver.add_root(MockElement::new("div").id("child-vm-select"));
        let available = list(driver, root, "available", available);
        let chosen = list(driver, root, "chosen", chosen);
        let right = driver.add_child(
            root,
            MockElement::new("button").attr("title", "Move selected VMs right"),
        );
        let left = driver.add_child(
            root,
            MockElement::new("button").attr("title", "Move selected VMs left"),
        );
        Fixture {
            available,
            chosen,
            right,
            left,
        }
    }

    #[tokio::test]
    async fn test_read_chosen() {
        let driver = Arc::new(MockDriver::new());
        let _ = child_vms(&driver, &["db01", "db02"], &["web01"]);
        let browser = browser(&driver);
        let kids = MultiBoxSelect::by_id("child-vm-select");
        assert_eq!(kids.read(&browser).await.unwrap(), json!(["web01"]));
        assert_eq!(kids.available(&browser).await.unwrap(), vec!["db01", "db02"]);
    }

    #[tokio::test]
    async fn test_fill_moves_both_ways() {
        let driver = Arc::new(MockDriver::new());
        let fx = child_vms(&driver, &["db01", "db02"], &["web01"]);
        let browser = browser(&driver);

        assert!(MultiBoxSelect::by_id("child-vm-select")
            .fill(&browser, &json!(["db02"]))
            .await
            .unwrap());
        assert_eq!(driver.clicks_on(fx.available[1]), 1);
        assert_eq!(driver.clicks_on(fx.available[0]), 0);
        assert_eq!(driver.clicks_on(fx.right), 1);
        assert_eq!(driver.clicks_on(fx.chosen[0]), 1);
        assert_eq!(driver.clicks_on(fx.left), 1);
    }

    #[tokio::test]
    async fn test_fill_already_chosen_is_noop() {
        let driver = Arc::new(MockDriver::new());
        let fx = child_vms(&driver, &["db01"], &["web01"]);
        let browser = browser(&driver);
        assert!(!MultiBoxSelect::by_id("child-vm-select")
            .fill(&browser, &json!(["web01"]))
            .await
            .unwrap());
        assert!(!driver.was_called("click"));
        assert_eq!(driver.clicks_on(fx.right), 0);
    }

    #[tokio::test]
    async fn test_fill_unknown_item() {
        let driver = Arc::new(MockDriver::new());
        let _ = child_vms(&driver, &["db01"], &[]);
        let browser = browser(&driver);
        let err = MultiBoxSelect::by_id("child-vm-select")
            .fill(&browser, &json!(["ghost"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::OptionNotFound { .. }));
    }
}
