//! In-memory DOM driver for testing views without a browser.
//!
//! [`MockDriver`] keeps an arena of [`MockElement`]s and answers
//! [`ViewDriver`] calls against it. Id, name, title, text and button
//! selectors are matched natively, as is a useful subset of CSS (type,
//! `#id`, `.class`, attribute tests, descendant and child combinators, comma
//! groups). XPath has no native support: register the node with
//! [`MockDriver::alias`] instead.
//!
//! ## Example
//!
//! ```rust,ignore
//! let driver = MockDriver::new();
//! let form = driver.add_root(MockElement::new("form"));
//! let email = driver.add_child(form, MockElement::new("input").attr("name", "email"));
//! ```

use crate::driver::{ElementHandle, ViewDriver};
use crate::locator::Selector;
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Index of a node in the mock DOM
pub type NodeId = usize;

const HANDLE_PREFIX: &str = "mock-";

/// Builder for a mock DOM element
#[derive(Debug, Clone)]
pub struct MockElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    displayed: bool,
    checked: bool,
}

impl MockElement {
    /// Create a visible element with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            displayed: true,
            checked: false,
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the `id` attribute
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Append to the `class` attribute
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        add_class(&mut self.attributes, class);
        self
    }

    /// Set own text content
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the form value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark as not displayed
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Set the checked/selected state
    #[must_use]
    pub const fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .get("class")
            .map(String::as_str)
            .unwrap_or_default()
            .split_whitespace()
    }

    fn is_toggle(&self) -> bool {
        self.tag == "input"
            && matches!(
                self.attributes.get("type").map(String::as_str),
                Some("checkbox" | "radio")
            )
    }
}

fn add_class(attributes: &mut BTreeMap<String, String>, class: &str) {
    let entry = attributes.entry("class".to_string()).or_default();
    if !entry.split_whitespace().any(|c| c == class) {
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(class);
    }
}

#[derive(Debug)]
struct Node {
    element: MockElement,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct MockState {
    nodes: Vec<Node>,
    aliases: HashMap<String, Vec<NodeId>>,
    url: String,
    history: Vec<String>,
}

impl MockState {
    fn node(&self, id: NodeId) -> ViewResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| ViewError::driver(format!("stale element {HANDLE_PREFIX}{id}")))
    }

    fn node_mut(&mut self, id: NodeId) -> ViewResult<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| ViewError::driver(format!("stale element {HANDLE_PREFIX}{id}")))
    }

    /// Nodes in document order, optionally restricted to descendants of `scope`
    fn document_order(&self, scope: Option<NodeId>) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match scope {
            Some(root) => self.nodes[root].children.iter().rev().copied().collect(),
            None => (0..self.nodes.len())
                .rev()
                .filter(|&i| self.nodes[i].parent.is_none())
                .collect(),
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        out
    }

    fn full_text(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, &mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, id: NodeId, parts: &mut Vec<String>) {
        let node = &self.nodes[id];
        let own = node.element.text.trim();
        if !own.is_empty() {
            parts.push(own.to_string());
        }
        for &child in &node.children {
            self.collect_text(child, parts);
        }
    }

    fn is_displayed(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            if !node.element.displayed {
                return false;
            }
            current = node.parent;
        }
        true
    }

    fn matches(&self, id: NodeId, selector: &Selector) -> ViewResult<bool> {
        let element = &self.nodes[id].element;
        let attr_is = |name: &str, expected: &str| {
            element.attributes.get(name).map(String::as_str) == Some(expected)
        };
        Ok(match selector {
            Selector::Id(v) => attr_is("id", v),
            Selector::Name(v) => attr_is("name", v),
            Selector::Title(v) => attr_is("title", v),
            Selector::Text(t) => self.full_text(id) == *t,
            Selector::CssWithText { css, text } => {
                CssQuery::parse(css)?.matches(self, id) && self.full_text(id) == *text
            }
            Selector::Button(t) => {
                let button_like = element.tag == "button"
                    || (element.tag == "a" && element.classes().any(|c| c == "btn"))
                    || (element.tag == "input"
                        && (attr_is("type", "button") || attr_is("type", "submit")));
                button_like
                    && (self.full_text(id) == *t
                        || element.value == *t
                        || attr_is("value", t)
                        || attr_is("title", t))
            }
            Selector::Css(css) => CssQuery::parse(css)?.matches(self, id),
            Selector::XPath(_) => {
                return Err(ViewError::driver(format!(
                    "mock driver cannot evaluate {selector}; register an alias"
                )))
            }
        })
    }
}

/// Mock driver for unit testing views and widgets
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a top-level element
    pub fn add_root(&self, element: MockElement) -> NodeId {
        let mut state = self.state();
        state.nodes.push(Node {
            element,
            parent: None,
            children: Vec::new(),
        });
        state.nodes.len() - 1
    }

    /// Append an element below `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this driver.
    pub fn add_child(&self, parent: NodeId, element: MockElement) -> NodeId {
        let mut state = self.state();
        let id = state.nodes.len();
        state.nodes.push(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        state.nodes[parent].children.push(id);
        id
    }

    /// Make `selector` resolve to `node` (in addition to earlier aliases)
    pub fn alias(&self, selector: &Selector, node: NodeId) {
        self.state()
            .aliases
            .entry(selector.to_string())
            .or_default()
            .push(node);
    }

    /// Handle for a node
    #[must_use]
    pub fn handle(&self, node: NodeId) -> ElementHandle {
        let tag = self
            .state()
            .nodes
            .get(node)
            .map(|n| n.element.tag.clone())
            .unwrap_or_default();
        ElementHandle::new(format!("{HANDLE_PREFIX}{node}"), tag)
    }

    /// Show or hide a node
    pub fn set_displayed(&self, node: NodeId, displayed: bool) {
        if let Some(n) = self.state().nodes.get_mut(node) {
            n.element.displayed = displayed;
        }
    }

    /// Replace the own text of a node
    pub fn set_text(&self, node: NodeId, text: &str) {
        if let Some(n) = self.state().nodes.get_mut(node) {
            n.element.text = text.to_string();
        }
    }

    /// Current form value of a node
    #[must_use]
    pub fn value_of(&self, node: NodeId) -> String {
        self.state()
            .nodes
            .get(node)
            .map(|n| n.element.value.clone())
            .unwrap_or_default()
    }

    /// Checked state of a node
    #[must_use]
    pub fn is_checked(&self, node: NodeId) -> bool {
        self.state()
            .nodes
            .get(node)
            .is_some_and(|n| n.element.checked)
    }

    /// Call history for verification
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state().history.clone()
    }

    /// Check if a call with the given prefix was made
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state().history.iter().any(|c| c.starts_with(prefix))
    }

    /// Number of clicks delivered to `node`
    #[must_use]
    pub fn clicks_on(&self, node: NodeId) -> usize {
        let entry = format!("click:{HANDLE_PREFIX}{node}");
        self.state().history.iter().filter(|c| **c == entry).count()
    }
}

fn node_id(handle: &ElementHandle) -> ViewResult<NodeId> {
    handle
        .id
        .strip_prefix(HANDLE_PREFIX)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| ViewError::driver(format!("foreign element handle {}", handle.id)))
}

#[async_trait]
impl ViewDriver for MockDriver {
    async fn navigate(&self, url: &str) -> ViewResult<()> {
        let mut state = self.state();
        state.history.push(format!("navigate:{url}"));
        state.url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> ViewResult<String> {
        Ok(self.state().url.clone())
    }

    async fn find_elements(
        &self,
        selector: &Selector,
        scope: Option<&ElementHandle>,
    ) -> ViewResult<Vec<ElementHandle>> {
        let scope = scope.map(node_id).transpose()?;
        let state = self.state();
        if let Some(root) = scope {
            let _ = state.node(root)?;
        }
        let candidates = state.document_order(scope);
        let matched: Vec<NodeId> = match state.aliases.get(&selector.to_string()) {
            Some(aliased) => candidates
                .into_iter()
                .filter(|id| aliased.contains(id))
                .collect(),
            None => {
                let mut out = Vec::new();
                for id in candidates {
                    if state.matches(id, selector)? {
                        out.push(id);
                    }
                }
                out
            }
        };
        Ok(matched
            .into_iter()
            .map(|id| {
                ElementHandle::new(
                    format!("{HANDLE_PREFIX}{id}"),
                    state.nodes[id].element.tag.clone(),
                )
            })
            .collect())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> ViewResult<bool> {
        let id = node_id(element)?;
        let state = self.state();
        let _ = state.node(id)?;
        Ok(state.is_displayed(id))
    }

    async fn text(&self, element: &ElementHandle) -> ViewResult<String> {
        let id = node_id(element)?;
        let state = self.state();
        let _ = state.node(id)?;
        Ok(state.full_text(id))
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> ViewResult<Option<String>> {
        let id = node_id(element)?;
        Ok(self.state().node(id)?.element.attributes.get(name).cloned())
    }

    async fn value(&self, element: &ElementHandle) -> ViewResult<String> {
        let id = node_id(element)?;
        Ok(self.state().node(id)?.element.value.clone())
    }

    async fn is_selected(&self, element: &ElementHandle) -> ViewResult<bool> {
        let id = node_id(element)?;
        Ok(self.state().node(id)?.element.checked)
    }

    async fn click(&self, element: &ElementHandle) -> ViewResult<()> {
        let id = node_id(element)?;
        let mut state = self.state();
        let _ = state.node(id)?;
        if !state.is_displayed(id) {
            return Err(ViewError::driver(format!(
                "element {} is not interactable",
                element.id
            )));
        }
        state.history.push(format!("click:{}", element.id));
        let node = state.node_mut(id)?;
        if node.element.is_toggle() || node.element.tag == "option" {
            let radio = node.element.attributes.get("type").map(String::as_str) == Some("radio");
            node.element.checked = radio || !node.element.checked;
        }
        Ok(())
    }

    async fn clear(&self, element: &ElementHandle) -> ViewResult<()> {
        let id = node_id(element)?;
        let mut state = self.state();
        state.node_mut(id)?.element.value.clear();
        state.history.push(format!("clear:{}", element.id));
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ViewResult<()> {
        let id = node_id(element)?;
        let mut state = self.state();
        state.node_mut(id)?.element.value.push_str(text);
        state.history.push(format!("send_keys:{}:{text}", element.id));
        Ok(())
    }
}

// =============================================================================
// CSS SUBSET
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals,
    StartsWith,
    EndsWith,
    Contains,
}

#[derive(Debug, Clone)]
struct AttrTest {
    name: String,
    op: AttrOp,
    value: String,
}

#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

impl Compound {
    fn matches(&self, element: &MockElement) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != element.tag) {
            return false;
        }
        if let Some(ref id) = self.id {
            if element.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if !self
            .classes
            .iter()
            .all(|wanted| element.classes().any(|c| c == wanted))
        {
            return false;
        }
        self.attrs.iter().all(|test| {
            let actual = element.attributes.get(&test.name);
            match (test.op, actual) {
                (AttrOp::Exists, found) => found.is_some(),
                (_, None) => false,
                (AttrOp::Equals, Some(v)) => *v == test.value,
                (AttrOp::StartsWith, Some(v)) => v.starts_with(&test.value),
                (AttrOp::EndsWith, Some(v)) => v.ends_with(&test.value),
                (AttrOp::Contains, Some(v)) => v.contains(&test.value),
            }
        })
    }
}

/// A comma-separated group of compound chains
#[derive(Debug, Clone)]
struct CssQuery {
    alternatives: Vec<Vec<(Combinator, Compound)>>,
}

impl CssQuery {
    fn parse(css: &str) -> ViewResult<Self> {
        let unsupported = || ViewError::driver(format!("mock driver cannot parse css {css:?}"));
        let mut alternatives = Vec::new();
        for group in css.split(',') {
            let mut chain = Vec::new();
            let mut combinator = Combinator::Descendant;
            for token in group.split_whitespace() {
                if token == ">" {
                    combinator = Combinator::Child;
                    continue;
                }
                let compound = parse_compound(token).ok_or_else(unsupported)?;
                chain.push((combinator, compound));
                combinator = Combinator::Descendant;
            }
            if chain.is_empty() {
                return Err(unsupported());
            }
            alternatives.push(chain);
        }
        Ok(Self { alternatives })
    }

    fn matches(&self, state: &MockState, id: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|chain| chain_matches(state, chain, chain.len() - 1, id))
    }
}

fn chain_matches(
    state: &MockState,
    chain: &[(Combinator, Compound)],
    index: usize,
    id: NodeId,
) -> bool {
    let (combinator, compound) = &chain[index];
    if !compound.matches(&state.nodes[id].element) {
        return false;
    }
    if index == 0 {
        return true;
    }
    let mut ancestor = state.nodes[id].parent;
    while let Some(parent) = ancestor {
        if chain_matches(state, chain, index - 1, parent) {
            return true;
        }
        if *combinator == Combinator::Child {
            return false;
        }
        ancestor = state.nodes[parent].parent;
    }
    false
}

fn read_ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && (chars[*i].is_alphanumeric() || matches!(chars[*i], '-' | '_')) {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

fn parse_compound(token: &str) -> Option<Compound> {
    let chars: Vec<char> = token.chars().collect();
    let mut compound = Compound::default();
    let mut i = 0;
    if chars.first() == Some(&'*') {
        i = 1;
    } else {
        let tag = read_ident(&chars, &mut i);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }
    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                let id = read_ident(&chars, &mut i);
                if id.is_empty() {
                    return None;
                }
                compound.id = Some(id);
            }
            '.' => {
                i += 1;
                let class = read_ident(&chars, &mut i);
                if class.is_empty() {
                    return None;
                }
                compound.classes.push(class);
            }
            '[' => {
                let end = i + chars[i..].iter().position(|&c| c == ']')?;
                let inner: String = chars[i + 1..end].iter().collect();
                compound.attrs.push(parse_attr(&inner)?);
                i = end + 1;
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_attr(inner: &str) -> Option<AttrTest> {
    let Some(eq) = inner.find('=') else {
        let name = inner.trim();
        return (!name.is_empty()).then(|| AttrTest {
            name: name.to_string(),
            op: AttrOp::Exists,
            value: String::new(),
        });
    };
    let (mut name, value) = (&inner[..eq], &inner[eq + 1..]);
    let op = match name.chars().last() {
        Some('^') => AttrOp::StartsWith,
        Some('$') => AttrOp::EndsWith,
        Some('*') => AttrOp::Contains,
        _ => AttrOp::Equals,
    };
    if op != AttrOp::Equals {
        name = &name[..name.len() - 1];
    }
    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
    Some(AttrTest {
        name: name.trim().to_string(),
        op,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MockDriver, NodeId, NodeId, NodeId) {
        let driver = MockDriver::new();
        let form = driver.add_root(MockElement::new("form").id("edit").class("form-horizontal"));
        let input = driver.add_child(
            form,
            MockElement::new("input")
                .attr("name", "description")
                .attr("type", "text")
                .value("old"),
        );
        let footer = driver.add_child(form, MockElement::new("div").class("footer"));
        let save = driver.add_child(
            footer,
            MockElement::new("button").class("btn").text("Save"),
        );
        (driver, form, input, save)
    }

    mod css_tests {
        use super::*;

        #[test]
        fn test_parse_compound() {
            let c = parse_compound("input.form-control[type=\"checkbox\"]").unwrap();
            assert_eq!(c.tag.as_deref(), Some("input"));
            assert_eq!(c.classes, vec!["form-control".to_string()]);
            assert_eq!(c.attrs[0].name, "type");
            assert_eq!(c.attrs[0].op, AttrOp::Equals);
            assert_eq!(c.attrs[0].value, "checkbox");
        }

        #[test]
        fn test_parse_suffix_and_exists() {
            let c = parse_compound("select[id$=available][multiple]").unwrap();
            assert_eq!(c.attrs[0].op, AttrOp::EndsWith);
            assert_eq!(c.attrs[0].value, "available");
            assert_eq!(c.attrs[1].op, AttrOp::Exists);
        }

        #[test]
        fn test_rejects_pseudo_classes() {
            assert!(parse_compound("input:checked").is_none());
            assert!(CssQuery::parse("input:checked").is_err());
        }

        #[tokio::test]
        async fn test_descendant_and_child() {
            let (driver, _, _, save) = sample();
            let found = driver
                .find_elements(&Selector::css("form div.footer button"), None)
                .await
                .unwrap();
            assert_eq!(found, vec![driver.handle(save)]);

            let child_only = driver
                .find_elements(&Selector::css("form > button"), None)
                .await
                .unwrap();
            assert!(child_only.is_empty());
        }

        #[tokio::test]
        async fn test_comma_group_keeps_document_order() {
            let (driver, _, input, save) = sample();
            let found = driver
                .find_elements(&Selector::css("button, input"), None)
                .await
                .unwrap();
            assert_eq!(found, vec![driver.handle(input), driver.handle(save)]);
        }
    }

    mod selector_tests {
        use super::*;

        #[tokio::test]
        async fn test_attribute_selectors() {
            let (driver, form, input, _) = sample();
            let by_name = driver
                .find_elements(&Selector::name("description"), None)
                .await
                .unwrap();
            assert_eq!(by_name, vec![driver.handle(input)]);
            let by_id = driver.find_elements(&Selector::id("edit"), None).await.unwrap();
            assert_eq!(by_id, vec![driver.handle(form)]);
        }

        #[tokio::test]
        async fn test_button_selector() {
            let (driver, _, _, save) = sample();
            let found = driver
                .find_elements(&Selector::button("Save"), None)
                .await
                .unwrap();
            assert_eq!(found, vec![driver.handle(save)]);
        }

        #[tokio::test]
        async fn test_xpath_requires_alias() {
            let (driver, form, _, _) = sample();
            let xpath = Selector::xpath("//form[@id='edit']");
            assert!(driver.find_elements(&xpath, None).await.is_err());

            driver.alias(&xpath, form);
            let found = driver.find_elements(&xpath, None).await.unwrap();
            assert_eq!(found, vec![driver.handle(form)]);
        }

        #[tokio::test]
        async fn test_scoped_lookup() {
            let (driver, form, _, _) = sample();
            let other = driver.add_root(MockElement::new("button").text("Save"));
            let scoped = driver
                .find_elements(&Selector::button("Save"), Some(&driver.handle(form)))
                .await
                .unwrap();
            assert_eq!(scoped.len(), 1);
            assert_ne!(scoped[0], driver.handle(other));
        }
    }

    mod interaction_tests {
        use super::*;

        #[tokio::test]
        async fn test_clear_and_type() {
            let (driver, _, input, _) = sample();
            let handle = driver.handle(input);
            driver.clear(&handle).await.unwrap();
            driver.send_keys(&handle, "new").await.unwrap();
            assert_eq!(driver.value_of(input), "new");
            assert!(driver.was_called("send_keys:mock-1:new"));
        }

        #[tokio::test]
        async fn test_checkbox_toggles() {
            let driver = MockDriver::new();
            let cb = driver.add_root(MockElement::new("input").attr("type", "checkbox"));
            driver.click(&driver.handle(cb)).await.unwrap();
            assert!(driver.is_checked(cb));
            driver.click(&driver.handle(cb)).await.unwrap();
            assert!(!driver.is_checked(cb));
            assert_eq!(driver.clicks_on(cb), 2);
        }

        #[tokio::test]
        async fn test_hidden_elements() {
            let (driver, form, _, save) = sample();
            driver.set_displayed(form, false);
            assert!(!driver.is_displayed(&driver.handle(save)).await.unwrap());
            assert!(driver.click(&driver.handle(save)).await.is_err());
        }

        #[tokio::test]
        async fn test_text_includes_descendants() {
            let (driver, _, _, _) = sample();
            let footer = driver
                .find_elements(&Selector::css("div.footer"), None)
                .await
                .unwrap();
            assert_eq!(driver.text(&footer[0]).await.unwrap(), "Save");
        }

        #[tokio::test]
        async fn test_navigate() {
            let driver = MockDriver::new();
            driver.navigate("https://appliance/vm_infra/explorer").await.unwrap();
            assert_eq!(
                driver.current_url().await.unwrap(),
                "https://appliance/vm_infra/explorer"
            );
            assert!(driver.was_called("navigate"));
        }

        #[tokio::test]
        async fn test_foreign_handle_rejected() {
            let driver = MockDriver::new();
            let err = driver
                .click(&ElementHandle::new("cdp-1", "div"))
                .await
                .unwrap_err();
            assert!(err.to_string().contains("foreign element handle"));
        }
    }
}
