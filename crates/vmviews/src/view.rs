//! View composition.
//!
//! A [`View`] is a page object: an ordered set of named children, each a
//! [`Widget`] or a nested [`View`]. Filling and reading walk the children in
//! declaration order, so a whole page (tabs included) can be driven from one
//! nested JSON/YAML document:
//!
//! ```yaml
//! request:
//!   email: admin@example.com
//! catalog:
//!   vm_name: web01
//! ```
//!
//! Views that live on a tab name it through [`View::tab_name`]; filling or
//! reading such a view first activates the tab.

use crate::browser::Browser;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use crate::widget::{Widget, WidgetDescriptor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A named child of a view
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    /// Widget binding
    Widget(&'a dyn Widget),
    /// Nested view
    View(&'a dyn View),
}

impl Child<'_> {
    /// Whether the child is currently shown
    pub async fn is_displayed(&self, browser: &Browser) -> ViewResult<bool> {
        match self {
            Self::Widget(w) => w.is_displayed(browser).await,
            Self::View(v) => v.is_displayed(browser).await,
        }
    }

    /// Current value
    pub async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        match self {
            Self::Widget(w) => w.read(browser).await,
            Self::View(v) => v.read(browser).await,
        }
    }

    /// Fill with `value`; returns whether anything changed
    pub async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        match self {
            Self::Widget(w) => w.fill(browser, value).await,
            Self::View(v) => v.fill(browser, value).await,
        }
    }

    fn describe(&self, name: &str) -> ChildDescriptor {
        match self {
            Self::Widget(w) => ChildDescriptor::Widget {
                name: name.to_string(),
                widget: w.describe(),
            },
            Self::View(v) => ChildDescriptor::View {
                name: name.to_string(),
                view: v.describe(),
            },
        }
    }
}

/// Builds a `Vec<(&str, Child)>` from struct fields, named after the fields.
///
/// ```rust,ignore
/// children![self; Widget title, View form]
/// ```
macro_rules! children {
    ($this:ident; $($kind:ident $field:ident),* $(,)?) => {
        vec![$((stringify!($field), $crate::view::Child::$kind(&$this.$field))),*]
    };
}
pub(crate) use children;

/// Serializable outline of a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    /// View name
    pub name: String,
    /// Tab label, for tab views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    /// Root locator, when scoped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Children in declaration order
    pub children: Vec<ChildDescriptor>,
}

impl ViewDescriptor {
    /// Number of widget bindings, nested views included
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                ChildDescriptor::Widget { .. } => 1,
                ChildDescriptor::View { view, .. } => view.widget_count(),
            })
            .sum()
    }

    /// Child by dotted path, e.g. `form.request.email`
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&ChildDescriptor> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let child = self.children.iter().find(|c| c.name() == head)?;
        match (rest, child) {
            (None, _) => Some(child),
            (Some(rest), ChildDescriptor::View { view, .. }) => view.find(rest),
            (Some(_), ChildDescriptor::Widget { .. }) => None,
        }
    }
}

/// Outline of one child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChildDescriptor {
    /// Widget binding
    Widget {
        /// Attribute name
        name: String,
        /// Widget kind and selector
        widget: WidgetDescriptor,
    },
    /// Nested view
    View {
        /// Attribute name
        name: String,
        /// Nested outline
        view: ViewDescriptor,
    },
}

impl ChildDescriptor {
    /// Attribute name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Widget { name, .. } | Self::View { name, .. } => name,
        }
    }
}

fn tab_link(tab: &str) -> Locator {
    Locator::from_selector(Selector::css_with_text("ul.nav-tabs li a", tab))
}

fn active_tab_link(tab: &str) -> Locator {
    Locator::from_selector(Selector::css_with_text("ul.nav-tabs li.active a", tab))
}

/// Click the tab labelled `tab` unless it is already active
pub async fn activate_tab(browser: &Browser, tab: &str) -> ViewResult<bool> {
    if browser.is_displayed(&active_tab_link(tab), None).await? {
        return Ok(false);
    }
    tracing::debug!(%tab, "activate tab");
    browser.click(&tab_link(tab), None).await?;
    Ok(true)
}

/// A page object
#[async_trait]
pub trait View: Send + Sync + fmt::Debug {
    /// Name for logging and catalogs
    fn view_name(&self) -> &str;

    /// Named children in declaration order
    fn children(&self) -> Vec<(&str, Child<'_>)>;

    /// Locator of the element the view lives in
    fn root(&self) -> Option<&Locator> {
        None
    }

    /// Label of the tab holding this view
    fn tab_name(&self) -> Option<&str> {
        None
    }

    /// Whether the view is on screen: its tab link, else its root, else yes
    async fn is_displayed(&self, browser: &Browser) -> ViewResult<bool> {
        if let Some(tab) = self.tab_name() {
            return browser.is_displayed(&tab_link(tab), None).await;
        }
        match self.root() {
            Some(root) => browser.is_displayed(root, None).await,
            None => Ok(true),
        }
    }

    /// Hook run before filling; may consume or rewrite values. Returns
    /// whether it changed the page itself.
    async fn before_fill(
        &self,
        browser: &Browser,
        values: &mut Map<String, Value>,
    ) -> ViewResult<bool> {
        let _ = (browser, values);
        Ok(false)
    }

    /// Hook run after filling
    async fn after_fill(&self, browser: &Browser, changed: bool) -> ViewResult<()> {
        let _ = (browser, changed);
        Ok(())
    }

    /// Fill children from an object keyed by child name; `null` values are
    /// skipped. Returns whether anything changed.
    async fn fill(&self, browser: &Browser, values: &Value) -> ViewResult<bool> {
        let Value::Object(values) = values else {
            return Err(ViewError::invalid_fill(
                self.view_name(),
                format!("expected object, got {values}"),
            ));
        };
        let mut values = values.clone();
        let mut changed = self.before_fill(browser, &mut values).await?;
        values.retain(|_, v| !v.is_null());
        if values.is_empty() {
            self.after_fill(browser, changed).await?;
            return Ok(changed);
        }

        if let Some(tab) = self.tab_name() {
            let _ = activate_tab(browser, tab).await?;
        }

        let children = self.children();
        for key in values.keys() {
            if !children.iter().any(|(name, _)| *name == key.as_str()) {
                tracing::warn!(view = %self.view_name(), %key, "ignoring unknown fill key");
            }
        }

        for (name, child) in &children {
            if let Some(value) = values.get(*name) {
                tracing::debug!(view = %self.view_name(), child = %name, "fill");
                changed |= child.fill(browser, value).await?;
            }
        }
        self.after_fill(browser, changed).await?;
        Ok(changed)
    }

    /// Object of every displayed child's value
    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        if let Some(tab) = self.tab_name() {
            let _ = activate_tab(browser, tab).await?;
        }
        let mut out = Map::new();
        for (name, child) in self.children() {
            if child.is_displayed(browser).await? {
                let _ = out.insert(name.to_string(), child.read(browser).await?);
            }
        }
        Ok(Value::Object(out))
    }

    /// Outline of the view tree
    fn describe(&self) -> ViewDescriptor {
        ViewDescriptor {
            name: self.view_name().to_string(),
            tab: self.tab_name().map(str::to_string),
            root: self.root().map(ToString::to_string),
            children: self
                .children()
                .iter()
                .map(|(name, child)| child.describe(name))
                .collect(),
        }
    }
}
