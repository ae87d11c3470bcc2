//! Checkboxes and checkbox lists.

use super::{value_as_bool, value_as_text_list, value_as_toggles, Widget, WidgetKind};
use crate::browser::Browser;
use crate::driver::ElementHandle;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use serde_json::Value;

const CHECKBOX_CSS: &str = "input[type=\"checkbox\"]";

/// Single checkbox input
#[derive(Debug, Clone)]
pub struct Checkbox {
    locator: Locator,
}

impl Checkbox {
    /// Checkbox with the given `id`
    #[must_use]
    pub fn by_id(id: &str) -> Self {
        Self {
            locator: Locator::from_selector(Selector::id(id)),
        }
    }

    /// Checked state
    pub async fn is_checked(&self, browser: &Browser) -> ViewResult<bool> {
        let element = browser.element(&self.locator, None).await?;
        browser.driver().is_selected(&element).await
    }

    /// Set the checked state; returns whether it changed
    pub async fn set(&self, browser: &Browser, checked: bool) -> ViewResult<bool> {
        let element = browser.element(&self.locator, None).await?;
        let driver = browser.driver();
        if driver.is_selected(&element).await? == checked {
            return Ok(false);
        }
        driver.click(&element).await?;
        Ok(true)
    }
}

#[async_trait]
impl Widget for Checkbox {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Checkbox
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        Ok(Value::Bool(self.is_checked(browser).await?))
    }

    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let checked = value_as_bool(&self.locator, value)?;
        self.set(browser, checked).await
    }
}

/// List of labelled checkboxes (`ul > li > label + input`)
#[derive(Debug, Clone)]
pub struct CheckboxSelect {
    locator: Locator,
    item: Locator,
    checkbox: Locator,
}

impl CheckboxSelect {
    /// Checkbox list rooted at `selector`
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            locator: Locator::from_selector(selector),
            item: Locator::new("li"),
            checkbox: Locator::new(CHECKBOX_CSS),
        }
    }

    /// `(label, checkbox)` for every item
    async fn items(&self, browser: &Browser) -> ViewResult<Vec<(String, ElementHandle)>> {
        let root = browser.element(&self.locator, None).await?;
        let driver = browser.driver();
        let mut items = Vec::new();
        for li in browser.elements(&self.item, Some(&root)).await? {
            let Some(checkbox) = browser
                .elements(&self.checkbox, Some(&li))
                .await?
                .into_iter()
                .next()
            else {
                continue;
            };
            items.push((driver.text(&li).await?, checkbox));
        }
        Ok(items)
    }

    /// Labels of every item
    pub async fn labels(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        Ok(self.items(browser).await?.into_iter().map(|(l, _)| l).collect())
    }

    /// Labels of checked items
    pub async fn checked(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        let driver = browser.driver();
        let mut out = Vec::new();
        for (label, checkbox) in self.items(browser).await? {
            if driver.is_selected(&checkbox).await? {
                out.push(label);
            }
        }
        Ok(out)
    }

    async fn apply(&self, browser: &Browser, wanted: &[(String, bool)]) -> ViewResult<bool> {
        let items = self.items(browser).await?;
        let driver = browser.driver();
        let mut changed = false;
        for (label, checked) in wanted {
            let (_, checkbox) = items.iter().find(|(l, _)| l == label).ok_or_else(|| {
                ViewError::OptionNotFound {
                    widget: self.locator.to_string(),
                    option: label.clone(),
                }
            })?;
            if driver.is_selected(checkbox).await? != *checked {
                driver.click(checkbox).await?;
                changed = true;
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl Widget for CheckboxSelect {
    fn kind(&self) -> WidgetKind {
        WidgetKind::CheckboxSelect
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        Ok(Value::from(self.checked(browser).await?))
    }

    /// An array checks exactly the listed labels; an object toggles only the
    /// labels it names.
    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let wanted = if value.is_object() {
            value_as_toggles(&self.locator, value)?
        } else {
            let listed = value_as_text_list(&self.locator, value)?;
            let labels = self.labels(browser).await?;
            if let Some(missing) = listed.iter().find(|l| !labels.contains(l)) {
                return Err(ViewError::OptionNotFound {
                    widget: self.locator.to_string(),
                    option: missing.clone(),
                });
            }
            labels
                .into_iter()
                .map(|l| {
                    let on = listed.contains(&l);
                    (l, on)
                })
                .collect()
        };
        self.apply(browser, &wanted).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement, NodeId};
    use crate::widget::testing::browser;
    use serde_json::json;
    use std::sync::Arc;

    mod checkbox_tests {
        use super::*;

        #[tokio::test]
        async fn test_fill_toggles_once() {
            let driver = Arc::new(MockDriver::new());
            let cb = driver.add_root(
                MockElement::new("input")
                    .attr("type", "checkbox")
                    .id("environment__placement_auto"),
            );
            let browser = browser(&driver);
            let auto = Checkbox::by_id("environment__placement_auto");

            assert!(auto.fill(&browser, &json!(true)).await.unwrap());
            assert!(!auto.fill(&browser, &json!(true)).await.unwrap());
            assert!(driver.is_checked(cb));
            assert_eq!(auto.read(&browser).await.unwrap(), json!(true));
            assert_eq!(driver.clicks_on(cb), 1);
        }

        #[tokio::test]
        async fn test_fill_requires_bool() {
            let driver = Arc::new(MockDriver::new());
            let _ = driver.add_root(MockElement::new("input").attr("type", "checkbox").id("x"));
            let browser = browser(&driver);
            assert!(Checkbox::by_id("x").fill(&browser, &json!("yes")).await.is_err());
        }
    }

    mod checkbox_select_tests {
        use super::*;

        fn tag_list(driver: &MockDriver) -> Vec<NodeId> {
            let ul = driver.add_root(MockElement::new("ul").id("tags"));
            ["Department: Engineering", "Environment: Prod", "Location: Brno"]
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let li = driver.add_child(ul, MockElement::new("li"));
                    let _ = driver.add_child(li, MockElement::new("label").text(*label));
                    driver.add_child(
                        li,
                        MockElement::new("input").attr("type", "checkbox").checked(i == 2),
                    )
                })
                .collect()
        }

        #[tokio::test]
        async fn test_read_checked_labels() {
            let driver = Arc::new(MockDriver::new());
            let _ = tag_list(&driver);
            let browser = browser(&driver);
            let select = CheckboxSelect::new(Selector::id("tags"));
            assert_eq!(select.read(&browser).await.unwrap(), json!(["Location: Brno"]));
            assert_eq!(select.labels(&browser).await.unwrap().len(), 3);
        }

        #[tokio::test]
        async fn test_fill_array_sets_exact_selection() {
            let driver = Arc::new(MockDriver::new());
            let boxes = tag_list(&driver);
            let browser = browser(&driver);
            let select = CheckboxSelect::new(Selector::id("tags"));

            assert!(select
                .fill(&browser, &json!(["Department: Engineering"]))
                .await
                .unwrap());
            assert!(driver.is_checked(boxes[0]));
            assert!(!driver.is_checked(boxes[1]));
            assert!(!driver.is_checked(boxes[2]));
        }

        #[tokio::test]
        async fn test_fill_object_toggles_named_only() {
            let driver = Arc::new(MockDriver::new());
            let boxes = tag_list(&driver);
            let browser = browser(&driver);
            let select = CheckboxSelect::new(Selector::id("tags"));

            assert!(select
                .fill(&browser, &json!({"Environment: Prod": true}))
                .await
                .unwrap());
            assert!(driver.is_checked(boxes[1]));
            assert!(driver.is_checked(boxes[2]));
        }

        #[tokio::test]
        async fn test_fill_unknown_label() {
            let driver = Arc::new(MockDriver::new());
            let _ = tag_list(&driver);
            let browser = browser(&driver);
            let err = CheckboxSelect::new(Selector::id("tags"))
                .fill(&browser, &json!(["Nope"]))
                .await
                .unwrap_err();
            assert!(matches!(err, ViewError::OptionNotFound { .. }));
        }
    }
}
