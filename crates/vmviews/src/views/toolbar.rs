//! Toolbar above VM and instance collections.

use crate::view::{children, Child, View};
use crate::widget::{Button, Dropdown, ViewSelector};
use async_trait::async_trait;

/// Toolbar of the VM/instance collection pages
#[derive(Debug)]
pub struct VmToolbar {
    /// Reload button
    pub reload: Button,
    /// Configuration menu
    pub configuration: Dropdown,
    /// Policy menu
    pub policy: Dropdown,
    /// Lifecycle menu
    pub lifecycle: Dropdown,
    /// Power Operations menu
    pub power: Dropdown,
    /// Download menu
    pub download: Dropdown,
    /// Grid/tile/list switcher
    pub view_selector: ViewSelector,
}

impl Default for VmToolbar {
    fn default() -> Self {
        Self::new()
    }
}

impl VmToolbar {
    /// Create the toolbar
    #[must_use]
    pub fn new() -> Self {
        Self {
            reload: Button::new("Reload current display"),
            configuration: Dropdown::new("Configuration"),
            policy: Dropdown::new("Policy"),
            lifecycle: Dropdown::new("Lifecycle"),
            power: Dropdown::new("Power Operations"),
            download: Dropdown::new("Download"),
            view_selector: ViewSelector::new(),
        }
    }
}

#[async_trait]
impl View for VmToolbar {
    fn view_name(&self) -> &str {
        "vm_toolbar"
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        children![
            self;
            Widget reload,
            Widget configuration,
            Widget policy,
            Widget lifecycle,
            Widget power,
            Widget download,
            Widget view_selector,
        ]
    }
}
