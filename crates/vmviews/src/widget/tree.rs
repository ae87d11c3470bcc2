//! Bootstrap tree views, plain and checkable.

use super::{value_as_text, value_as_toggles, Widget, WidgetKind};
use crate::browser::Browser;
use crate::driver::ElementHandle;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TreeMode {
    Select,
    Check,
}

#[derive(Debug)]
struct Node {
    text: String,
    element: ElementHandle,
    selected: bool,
    checked: bool,
}

/// `bootstrap-treeview` rendered into the element with the given id
#[derive(Debug, Clone)]
pub struct TreeView {
    tree_id: String,
    mode: TreeMode,
    locator: Locator,
}

impl TreeView {
    fn with_mode(tree_id: &str, mode: TreeMode) -> Self {
        Self {
            tree_id: tree_id.to_string(),
            mode,
            locator: Locator::from_selector(Selector::id(tree_id)),
        }
    }

    /// Tree where filling selects one node
    #[must_use]
    pub fn bootstrap(tree_id: &str) -> Self {
        Self::with_mode(tree_id, TreeMode::Select)
    }

    /// Tree of checkboxes; filling toggles nodes
    #[must_use]
    pub fn checkable(tree_id: &str) -> Self {
        Self::with_mode(tree_id, TreeMode::Check)
    }

    /// Tree element id
    #[must_use]
    pub fn tree_id(&self) -> &str {
        &self.tree_id
    }

    async fn nodes(&self, browser: &Browser) -> ViewResult<Vec<Node>> {
        let root = browser.element(&self.locator, None).await?;
        let driver = browser.driver();
        let mut out = Vec::new();
        for li in browser.elements(&Locator::new("li.list-group-item"), Some(&root)).await? {
            let class = driver.attribute(&li, "class").await?.unwrap_or_default();
            let has = |name: &str| class.split_whitespace().any(|c| c == name);
            out.push(Node {
                text: driver.text(&li).await?,
                selected: has("node-selected"),
                checked: has("node-checked"),
                element: li,
            });
        }
        Ok(out)
    }

    fn missing(&self, text: &str) -> ViewError {
        ViewError::OptionNotFound {
            widget: format!("tree#{}", self.tree_id),
            option: text.to_string(),
        }
    }

    /// Visible node texts in document order
    pub async fn node_texts(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        Ok(self.nodes(browser).await?.into_iter().map(|n| n.text).collect())
    }

    /// Text of the selected node
    pub async fn selected(&self, browser: &Browser) -> ViewResult<Option<String>> {
        Ok(self
            .nodes(browser)
            .await?
            .into_iter()
            .find(|n| n.selected)
            .map(|n| n.text))
    }

    /// Texts of the checked nodes
    pub async fn checked(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        Ok(self
            .nodes(browser)
            .await?
            .into_iter()
            .filter(|n| n.checked)
            .map(|n| n.text)
            .collect())
    }

    /// Click the node reading `text`; returns whether it was not yet selected
    pub async fn select_node(&self, browser: &Browser, text: &str) -> ViewResult<bool> {
        let node = self
            .nodes(browser)
            .await?
            .into_iter()
            .find(|n| n.text == text)
            .ok_or_else(|| self.missing(text))?;
        if node.selected {
            return Ok(false);
        }
        tracing::debug!(tree = %self.tree_id, %text, "select tree node");
        browser.driver().click(&node.element).await?;
        Ok(true)
    }

    /// Set the check state of the node reading `text`; returns whether it changed
    pub async fn check_node(
        &self,
        browser: &Browser,
        text: &str,
        checked: bool,
    ) -> ViewResult<bool> {
        let node = self
            .nodes(browser)
            .await?
            .into_iter()
            .find(|n| n.text == text)
            .ok_or_else(|| self.missing(text))?;
        if node.checked == checked {
            return Ok(false);
        }
        tracing::debug!(tree = %self.tree_id, %text, checked, "toggle tree node");
        browser
            .click(&Locator::new("span.check-icon"), Some(&node.element))
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl Widget for TreeView {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Tree
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        match self.mode {
            TreeMode::Select => Ok(self
                .selected(browser)
                .await?
                .map_or(Value::Null, Value::String)),
            TreeMode::Check => Ok(Value::from(self.checked(browser).await?)),
        }
    }

    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        match self.mode {
            TreeMode::Select => {
                let text = value_as_text(&self.locator, value)?;
                self.select_node(browser, &text).await
            }
            TreeMode::Check => {
                let mut changed = false;
                for (text, checked) in value_as_toggles(&self.locator, value)? {
                    changed |= self.check_node(browser, &text, checked).await?;
                }
                Ok(changed)
            }
        }
    }
}
