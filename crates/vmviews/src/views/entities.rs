//! Collection and details entities of VM/instance pages.
//!
//! [`VmEntities`] maps only the VM-specific parts of the collection body. The
//! generic collection widgets every entity page shares (search box, paginator
//! and the entity tiles or rows) are not modelled here.

use super::base::FLASH_XPATH;
use crate::browser::Browser;
use crate::locator::Selector;
use crate::result::ViewResult;
use crate::view::{children, Child, View};
use crate::widget::{FlashMessages, SummaryTable, Text, Widget};
use async_trait::async_trait;

/// Collection page body
#[derive(Debug)]
pub struct VmEntities {
    /// Page heading
    pub title: Text,
    /// "Clear" link shown while an advanced search is applied
    pub adv_search_clear: Text,
}

impl Default for VmEntities {
    fn default() -> Self {
        Self::new()
    }
}

impl VmEntities {
    /// Create the collection body
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: Text::xpath("//div[@id=\"main-content\"]//h1"),
            adv_search_clear: Text::xpath(
                "//div[@id=\"main-content\"]//h1//span[@id=\"clear_search\"]/a",
            ),
        }
    }

    /// Drop the applied advanced search, if any; returns whether one was applied
    pub async fn clear_search(&self, browser: &Browser) -> ViewResult<bool> {
        if !self.adv_search_clear.is_displayed(browser).await? {
            return Ok(false);
        }
        browser.click(self.adv_search_clear.locator(), None).await?;
        Ok(true)
    }
}

#[async_trait]
impl View for VmEntities {
    fn view_name(&self) -> &str {
        "vm_entities"
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        children![self; Widget title, Widget adv_search_clear]
    }
}

/// Details page body: title, flash and the summary tables
#[derive(Debug)]
pub struct VmDetailsEntities {
    /// Page heading
    pub title: Text,
    /// Flash messages
    pub flash: FlashMessages,
    /// Properties
    pub properties: SummaryTable,
    /// Lifecycle
    pub lifecycle: SummaryTable,
    /// Relationships
    pub relationships: SummaryTable,
    /// VMsafe
    pub vmsafe: SummaryTable,
    /// Custom Attributes, only shown when any are assigned
    pub attributes: SummaryTable,
    /// Compliance
    pub compliance: SummaryTable,
    /// Power Management
    pub power_management: SummaryTable,
    /// Security
    pub security: SummaryTable,
    /// Configuration
    pub configuration: SummaryTable,
    /// Diagnostics
    pub diagnostics: SummaryTable,
    /// Smart Management
    pub smart_management: SummaryTable,
}

impl Default for VmDetailsEntities {
    fn default() -> Self {
        Self::new()
    }
}

impl VmDetailsEntities {
    /// Create the details body
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: Text::xpath(
                "//div[@id=\"main-content\"]//h1//span[@id=\"explorer_title_text\"]",
            ),
            flash: FlashMessages::new(Selector::xpath(FLASH_XPATH)),
            properties: SummaryTable::new("Properties"),
            lifecycle: SummaryTable::new("Lifecycle"),
            relationships: SummaryTable::new("Relationships"),
            vmsafe: SummaryTable::new("VMsafe"),
            attributes: SummaryTable::new("Custom Attributes"),
            compliance: SummaryTable::new("Compliance"),
            power_management: SummaryTable::new("Power Management"),
            security: SummaryTable::new("Security"),
            configuration: SummaryTable::new("Configuration"),
            diagnostics: SummaryTable::new("Diagnostics"),
            smart_management: SummaryTable::new("Smart Management"),
        }
    }

    /// Summary table by its title
    #[must_use]
    pub fn summary(&self, title: &str) -> Option<&SummaryTable> {
        [
            &self.properties,
            &self.lifecycle,
            &self.relationships,
            &self.vmsafe,
            &self.attributes,
            &self.compliance,
            &self.power_management,
            &self.security,
            &self.configuration,
            &self.diagnostics,
            &self.smart_management,
        ]
        .into_iter()
        .find(|t| t.title() == title)
    }
}

#[async_trait]
impl View for VmDetailsEntities {
    fn view_name(&self) -> &str {
        "vm_details_entities"
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        children![
            self;
            Widget title,
            Widget flash,
            Widget properties,
            Widget lifecycle,
            Widget relationships,
            Widget vmsafe,
            Widget attributes,
            Widget compliance,
            Widget power_management,
            Widget security,
            Widget configuration,
            Widget diagnostics,
            Widget smart_management,
        ]
    }
}
