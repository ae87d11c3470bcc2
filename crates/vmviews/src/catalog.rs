//! Registry of the VM views, for locator audits and the CLI.

use crate::context::VmContext;
use crate::result::{ViewError, ViewResult};
use crate::version::Version;
use crate::view::{View, ViewDescriptor};
use crate::views::{
    EditTagsView, EditView, LoggedInPage, ManagePoliciesView, ManagementEngineView,
    PolicySimulationView, ProvisionView, RetirementView, RightSizeView, SetOwnershipView,
    VmDetailsEntities, VmEntities, VmToolbar,
};

/// Builds a view for an appliance version
pub type ViewFactory = fn(&Version) -> ViewResult<Box<dyn View>>;

#[derive(Debug, Clone, Copy)]
struct CatalogEntry {
    name: &'static str,
    build: ViewFactory,
}

/// Named view factories, in registration order
#[derive(Debug, Default)]
pub struct ViewCatalog {
    entries: Vec<CatalogEntry>,
}

fn boxed<V: View + 'static>(view: V) -> ViewResult<Box<dyn View>> {
    Ok(Box::new(view))
}

impl ViewCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every VM/instance view
    #[must_use]
    pub fn vm() -> Self {
        let mut catalog = Self::new();
        catalog.register("logged_in_page", |_| boxed(LoggedInPage::new()));
        catalog.register("vm_toolbar", |_| boxed(VmToolbar::new()));
        catalog.register("vm_entities", |_| boxed(VmEntities::new()));
        catalog.register("vm_details_entities", |_| boxed(VmDetailsEntities::new()));
        catalog.register("provision", |v| {
            boxed(ProvisionView::new(VmContext::default(), v)?)
        });
        catalog.register("retirement", |_| boxed(RetirementView::new()));
        catalog.register("edit", |_| boxed(EditView::new()));
        catalog.register("edit_tags", |_| boxed(EditTagsView::new()));
        catalog.register("set_ownership", |_| boxed(SetOwnershipView::new()));
        catalog.register("management_engine", |_| boxed(ManagementEngineView::new()));
        catalog.register("manage_policies", |_| boxed(ManagePoliciesView::new()));
        catalog.register("policy_simulation", |_| boxed(PolicySimulationView::new()));
        catalog.register("right_size", |_| boxed(RightSizeView::new()));
        catalog
    }

    /// Register (or replace) a view under `name`
    pub fn register(&mut self, name: &'static str, build: ViewFactory) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.build = build;
        } else {
            self.entries.push(CatalogEntry { name, build });
        }
    }

    /// Registered names
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Number of registered views
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Build the view `name` for `version`
    pub fn get(&self, name: &str, version: &Version) -> ViewResult<Box<dyn View>> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ViewError::UnknownView {
                name: name.to_string(),
            })?;
        (entry.build)(version)
    }

    /// Outline of the view `name` for `version`
    pub fn describe(&self, name: &str, version: &Version) -> ViewResult<ViewDescriptor> {
        Ok(self.get(name, version)?.describe())
    }

    /// Outlines of every view for `version`
    pub fn descriptors(&self, version: &Version) -> ViewResult<Vec<ViewDescriptor>> {
        tracing::debug!(%version, views = self.entries.len(), "describing catalog");
        self.entries
            .iter()
            .map(|e| Ok((e.build)(version)?.describe()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ChildDescriptor;
    use crate::widget::WidgetKind;

    #[test]
    fn test_vm_catalog_names_match_views() {
        let catalog = ViewCatalog::vm();
        assert_eq!(catalog.count(), 13);
        for name in catalog.list() {
            let view = catalog.get(name, &Version::latest()).unwrap();
            assert_eq!(view.view_name(), name);
        }
    }

    #[test]
    fn test_unknown_view() {
        let err = ViewCatalog::vm()
            .describe("dashboard", &Version::latest())
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown view \"dashboard\"");
    }

    #[test]
    fn test_descriptors_follow_version() {
        let catalog = ViewCatalog::vm();
        let old = catalog.describe("provision", &Version::parse("5.6").unwrap()).unwrap();
        let Some(ChildDescriptor::Widget { widget, .. }) = old.find("form.purpose.apply_tags")
        else {
            panic!("apply_tags is a widget");
        };
        assert_eq!(widget.kind, WidgetKind::CheckboxSelect);
        assert_eq!(catalog.descriptors(&Version::latest()).unwrap().len(), 13);
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = ViewCatalog::new();
        catalog.register("page", |_| boxed(VmToolbar::new()));
        catalog.register("page", |_| boxed(LoggedInPage::new()));
        assert_eq!(catalog.list(), vec!["page"]);
        let outline = catalog.describe("page", &Version::lowest()).unwrap();
        assert_eq!(outline.name, "logged_in_page");
    }

    #[test]
    fn test_descriptors_serialize() {
        let outlines = ViewCatalog::vm().descriptors(&Version::latest()).unwrap();
        let yaml = serde_yaml_ng::to_string(&outlines).unwrap();
        assert!(yaml.contains("name: vm_toolbar"));
        assert!(yaml.contains("tab: Schedule"));
    }
}
