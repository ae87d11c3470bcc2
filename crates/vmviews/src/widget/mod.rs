//! Widget primitives.
//!
//! A widget knows how to find, read and fill one kind of control. Widgets
//! hold only their [`Locator`]; every operation takes the [`Browser`] of the
//! session, so the same view definition can be reused across sessions.
//!
//! Values cross the widget boundary as [`serde_json::Value`] so that whole
//! views can be filled from (and read into) nested JSON/YAML documents.

mod button;
mod calendar;
mod checkbox;
mod flash;
mod multibox;
mod select;
mod table;
mod text;
mod toolbar;
mod tree;

pub use button::Button;
pub use calendar::Calendar;
pub use checkbox::{Checkbox, CheckboxSelect};
pub use flash::{FlashLevel, FlashMessage, FlashMessages};
pub use multibox::MultiBoxSelect;
pub use select::{BootstrapSelect, Dropdown};
pub use table::{SummaryTable, Table, TableRow};
pub use text::{Text, TextInput};
pub use toolbar::ViewSelector;
pub use tree::TreeView;

use crate::browser::Browser;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of a widget, for catalogs and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Static text
    Text,
    /// Text input
    TextInput,
    /// Single checkbox
    Checkbox,
    /// Button
    Button,
    /// Toolbar dropdown menu
    Dropdown,
    /// Bootstrap select
    Select,
    /// Date picker input
    Calendar,
    /// Data table
    Table,
    /// Two-column summary table
    SummaryTable,
    /// Flash message area
    FlashMessages,
    /// Available/chosen dual list
    MultiBoxSelect,
    /// Tree view
    Tree,
    /// List of checkboxes
    CheckboxSelect,
    /// Grid/tile/list switcher
    ViewSelector,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::TextInput => "text_input",
            Self::Checkbox => "checkbox",
            Self::Button => "button",
            Self::Dropdown => "dropdown",
            Self::Select => "select",
            Self::Calendar => "calendar",
            Self::Table => "table",
            Self::SummaryTable => "summary_table",
            Self::FlashMessages => "flash_messages",
            Self::MultiBoxSelect => "multi_box_select",
            Self::Tree => "tree",
            Self::CheckboxSelect => "checkbox_select",
            Self::ViewSelector => "view_selector",
        };
        f.write_str(name)
    }
}

/// Serializable description of a widget binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Widget kind
    pub kind: WidgetKind,
    /// Root selector
    pub selector: Selector,
}

/// One kind of UI control
#[async_trait]
pub trait Widget: Send + Sync + fmt::Debug {
    /// Widget kind
    fn kind(&self) -> WidgetKind;

    /// Root locator
    fn locator(&self) -> &Locator;

    /// Whether the widget is currently shown
    async fn is_displayed(&self, browser: &Browser) -> ViewResult<bool> {
        browser.is_displayed(self.locator(), None).await
    }

    /// Current value
    async fn read(&self, browser: &Browser) -> ViewResult<Value>;

    /// Set the value; returns whether anything changed
    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let _ = (browser, value);
        Err(ViewError::ReadOnly {
            widget: self.locator().to_string(),
        })
    }

    /// Catalog entry
    fn describe(&self) -> WidgetDescriptor {
        WidgetDescriptor {
            kind: self.kind(),
            selector: self.locator().selector().clone(),
        }
    }
}

/// Table header as a field name: lower case, runs of anything else as `_`
#[must_use]
pub fn attributize(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    for c in header.trim().chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Accept strings and numbers as text
pub(crate) fn value_as_text(widget: &Locator, value: &Value) -> ViewResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ViewError::invalid_fill(
            widget,
            format!("expected string or number, got {other}"),
        )),
    }
}

pub(crate) fn value_as_bool(widget: &Locator, value: &Value) -> ViewResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ViewError::invalid_fill(widget, format!("expected bool, got {value}")))
}

/// Accept one string or an array of strings
pub(crate) fn value_as_text_list(widget: &Locator, value: &Value) -> ViewResult<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(|v| value_as_text(widget, v)).collect(),
        other => Ok(vec![value_as_text(widget, other)?]),
    }
}

/// Accept an object of name → bool
pub(crate) fn value_as_toggles(widget: &Locator, value: &Value) -> ViewResult<Vec<(String, bool)>> {
    let Value::Object(map) = value else {
        return Err(ViewError::invalid_fill(
            widget,
            format!("expected object of name -> bool, got {value}"),
        ));
    };
    map.iter()
        .map(|(name, v)| Ok((name.clone(), value_as_bool(widget, v)?)))
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for widget tests.

    use crate::browser::Browser;
    use crate::config::ViewConfig;
    use crate::mock::MockDriver;
    use std::sync::Arc;

    /// A fast-failing browser over a shared mock driver
    pub fn browser(driver: &Arc<MockDriver>) -> Browser {
        Browser::with_driver(
            driver.clone(),
            ViewConfig::new()
                .with_timeout_ms(20)
                .with_poll_interval_ms(5)
                .with_template_settle_ms(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributize() {
        assert_eq!(attributize("Name"), "name");
        assert_eq!(attributize("Operating System"), "operating_system");
        assert_eq!(attributize("  Last Analysis Time "), "last_analysis_time");
        assert_eq!(attributize("CPU / Memory"), "cpu_memory");
        assert_eq!(attributize(""), "");
    }

    #[test]
    fn test_value_as_text() {
        let loc = Locator::new("input");
        assert_eq!(value_as_text(&loc, &json!("a")).unwrap(), "a");
        assert_eq!(value_as_text(&loc, &json!(4)).unwrap(), "4");
        assert!(value_as_text(&loc, &json!(true)).is_err());
    }

    #[test]
    fn test_value_as_text_list() {
        let loc = Locator::new("select");
        assert_eq!(value_as_text_list(&loc, &json!("x")).unwrap(), vec!["x"]);
        assert_eq!(
            value_as_text_list(&loc, &json!(["x", 2])).unwrap(),
            vec!["x", "2"]
        );
        assert!(value_as_text_list(&loc, &json!([{}])).is_err());
    }

    #[test]
    fn test_value_as_toggles() {
        let loc = Locator::new("ul");
        let toggles = value_as_toggles(&loc, &json!({"a": true, "b": false})).unwrap();
        assert_eq!(toggles, vec![("a".to_string(), true), ("b".to_string(), false)]);
        assert!(value_as_toggles(&loc, &json!(["a"])).is_err());
        assert!(value_as_toggles(&loc, &json!({"a": "yes"})).is_err());
    }

    #[test]
    fn test_widget_kind_display_matches_serde() {
        for kind in [WidgetKind::TextInput, WidgetKind::SummaryTable, WidgetKind::Tree] {
            let serialized = serde_json::to_value(kind).unwrap();
            assert_eq!(serialized, json!(kind.to_string()));
        }
    }
}
