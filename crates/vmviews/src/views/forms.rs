//! Action pages reached from a VM's toolbar: a form below the shared chrome.
//!
//! None of these pages can tell itself apart from its siblings yet, so every
//! `is_displayed` answers `false`.

use super::base::LoggedInPage;
use crate::browser::Browser;
use crate::result::ViewResult;
use crate::view::{children, Child, View};
use crate::widget::{BootstrapSelect, Button, Calendar, MultiBoxSelect, Text, TextInput, TreeView};
use async_trait::async_trait;

/// Defines the widget struct of an action form plus its [`View`] impl.
macro_rules! action_form {
    (
        $(#[$meta:meta])*
        $name:ident, $view_name:literal {
            $($(#[$fmeta:meta])* $field:ident: $ty:ty = $init:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            $($(#[$fmeta])* pub $field: $ty),*
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            /// Create the form
            #[must_use]
            pub fn new() -> Self {
                Self {
                    $($field: $init),*
                }
            }
        }

        #[async_trait]
        impl View for $name {
            fn view_name(&self) -> &str {
                $view_name
            }

            fn children(&self) -> Vec<(&str, Child<'_>)> {
                children![self; $(Widget $field),*]
            }
        }
    };
}

/// Defines an action page: shared chrome, optional title and a form.
macro_rules! action_view {
    (@fields $(#[$meta:meta])* $view:ident, $form:ty, $view_name:literal, [$($title:ident)?]) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $view {
            /// Shared page chrome
            pub page: LoggedInPage,
            $(
                /// Page title
                pub $title: Text,
            )?
            /// The form
            pub form: $form,
        }

        impl Default for $view {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $view {
            /// Create the view
            #[must_use]
            pub fn new() -> Self {
                Self {
                    page: LoggedInPage::new(),
                    $($title: Text::css("#explorer_title_text"),)?
                    form: <$form>::new(),
                }
            }
        }

        #[async_trait]
        impl View for $view {
            fn view_name(&self) -> &str {
                $view_name
            }

            fn children(&self) -> Vec<(&str, Child<'_>)> {
                let mut out = self.page.children();
                out.extend(children![self; $(Widget $title,)? View form]);
                out
            }

            async fn is_displayed(&self, _browser: &Browser) -> ViewResult<bool> {
                Ok(false)
            }
        }
    };
    ($(#[$meta:meta])* $view:ident, $form:ty, $view_name:literal, titled) => {
        action_view!(@fields $(#[$meta])* $view, $form, $view_name, [title]);
    };
    ($(#[$meta:meta])* $view:ident, $form:ty, $view_name:literal) => {
        action_view!(@fields $(#[$meta])* $view, $form, $view_name, []);
    };
}

action_form! {
    /// Retirement date and warning
    RetirementForm, "retirement_form" {
        /// Retirement date
        retirement_date: Calendar = Calendar::by_name("retirementDate"),
        /// Warning before retirement
        retirement_warning: BootstrapSelect = BootstrapSelect::new("retirementWarning"),
        /// Save
        save_button: Button = Button::new("Save"),
        /// Cancel
        cancel_button: Button = Button::new("Cancel"),
    }
}

action_view! {
    /// Set retirement date for a VM or instance
    RetirementView, RetirementForm, "retirement", titled
}

action_form! {
    /// Custom identifier, description and genealogy
    EditForm, "edit_form" {
        /// Custom identifier
        custom_identifier: TextInput = TextInput::by_id("custom_1"),
        /// Description
        description: TextInput = TextInput::by_id("description"),
        /// Parent VM
        parent_vm: BootstrapSelect = BootstrapSelect::new("chosen_parent"),
        /// Child VMs
        child_vms: MultiBoxSelect = MultiBoxSelect::by_id("child-vm-select"),
        /// Save
        save_button: Button = Button::new("Save"),
        /// Reset
        reset_button: Button = Button::new("Reset"),
        /// Cancel
        cancel_button: Button = Button::new("Cancel"),
    }
}

action_view! {
    /// Edit a VM or instance
    EditView, EditForm, "edit", titled
}

action_form! {
    /// Tag assignment
    EditTagsForm, "edit_tags_form" {
        /// Tag category
        tag_category: BootstrapSelect = BootstrapSelect::new("tag_cat"),
        /// Tag within the category
        tag: BootstrapSelect = BootstrapSelect::new("tag_add"),
        /// Save
        save_button: Button = Button::new("Save"),
        /// Reset
        reset_button: Button = Button::new("Reset"),
        /// Cancel
        cancel_button: Button = Button::new("Cancel"),
    }
}

action_view! {
    /// Edit tags of a VM or instance
    EditTagsView, EditTagsForm, "edit_tags"
}

action_form! {
    /// Owner and group
    SetOwnershipForm, "set_ownership_form" {
        /// Owning user
        user_name: BootstrapSelect = BootstrapSelect::new("user_name"),
        /// Owning group
        group_name: BootstrapSelect = BootstrapSelect::new("group_name"),
        /// Save
        save_button: Button = Button::new("Save"),
        /// Reset
        reset_button: Button = Button::new("Reset"),
        /// Cancel
        cancel_button: Button = Button::new("Cancel"),
    }
}

action_view! {
    /// Set ownership of a VM or instance
    SetOwnershipView, SetOwnershipForm, "set_ownership"
}

action_form! {
    /// Management engine relationship
    ManagementEngineForm, "management_engine_form" {
        /// Server
        server: BootstrapSelect = BootstrapSelect::new("server_id"),
        /// Save
        save_button: Button = Button::new("Save"),
        /// Reset
        reset_button: Button = Button::new("Reset"),
        /// Cancel
        cancel_button: Button = Button::new("Cancel"),
    }
}

action_view! {
    /// Edit the management engine relationship
    ManagementEngineView, ManagementEngineForm, "management_engine"
}

action_form! {
    /// Policy profile assignment
    ManagePoliciesForm, "manage_policies_form" {
        /// Policy profiles
        policy_profiles: TreeView = TreeView::checkable("protectbox"),
        /// Save
        save_button: Button = Button::new("Save"),
        /// Reset
        reset_button: Button = Button::new("Reset"),
        /// Cancel
        cancel_button: Button = Button::new("Cancel"),
    }
}

action_view! {
    /// Manage policies of a VM or instance
    ManagePoliciesView, ManagePoliciesForm, "manage_policies"
}

action_form! {
    /// Policy to simulate
    PolicySimulationForm, "policy_simulation_form" {
        /// Policy
        policy: BootstrapSelect = BootstrapSelect::new("policy_id"),
        /// Cancel
        cancel_button: Button = Button::new("Cancel"),
    }
}

action_view! {
    /// Policy simulation
    PolicySimulationView, PolicySimulationForm, "policy_simulation"
}

/// Right-size recommendations; only the shared chrome is mapped
#[derive(Debug, Default)]
pub struct RightSizeView {
    /// Shared page chrome
    pub page: LoggedInPage,
}

impl RightSizeView {
    /// Create the view
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl View for RightSizeView {
    fn view_name(&self) -> &str {
        "right_size"
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        self.page.children()
    }

    async fn is_displayed(&self, _browser: &Browser) -> ViewResult<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement};
    use crate::view::ChildDescriptor;
    use crate::widget::testing::browser;
    use crate::widget::{Widget, WidgetKind};
    use serde_json::json;
    use std::sync::Arc;

    fn names(view: &dyn View) -> Vec<String> {
        view.describe()
            .children
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    mod layout_tests {
        use super::*;

        #[test]
        fn test_title_only_where_mapped() {
            assert_eq!(
                names(&RetirementView::new()),
                vec!["flash", "logged_in_as", "title", "form"]
            );
            assert_eq!(names(&EditView::new()), vec!["flash", "logged_in_as", "title", "form"]);
            assert_eq!(names(&EditTagsView::new()), vec!["flash", "logged_in_as", "form"]);
            assert_eq!(names(&RightSizeView::new()), vec!["flash", "logged_in_as"]);
        }

        #[test]
        fn test_edit_form_fields() {
            let outline = EditView::new().describe();
            let Some(ChildDescriptor::View { view: form, .. }) = outline.find("form") else {
                panic!("form is a nested view");
            };
            let fields: Vec<&str> = form.children.iter().map(ChildDescriptor::name).collect();
            assert_eq!(
                fields,
                vec![
                    "custom_identifier",
                    "description",
                    "parent_vm",
                    "child_vms",
                    "save_button",
                    "reset_button",
                    "cancel_button"
                ]
            );
            let Some(ChildDescriptor::Widget { widget, .. }) = outline.find("form.child_vms") else {
                panic!("child_vms is a widget");
            };
            assert_eq!(widget.kind, WidgetKind::MultiBoxSelect);
        }

        #[test]
        fn test_policy_profiles_tree() {
            let form = ManagePoliciesView::new().form;
            assert_eq!(form.policy_profiles.tree_id(), "protectbox");
            assert_eq!(form.policy_profiles.kind(), WidgetKind::Tree);
        }
    }

    mod displayed_tests {
        use super::*;

        #[tokio::test]
        async fn test_action_views_never_displayed() {
            let driver = Arc::new(MockDriver::new());
            let _ =
                driver.add_root(MockElement::new("h1").id("explorer_title_text").text("Edit VM"));
            let browser = browser(&driver);
            let views: Vec<Box<dyn View>> = vec![
                Box::new(RetirementView::new()),
                Box::new(EditView::new()),
                Box::new(EditTagsView::new()),
                Box::new(SetOwnershipView::new()),
                Box::new(ManagementEngineView::new()),
                Box::new(ManagePoliciesView::new()),
                Box::new(PolicySimulationView::new()),
                Box::new(RightSizeView::new()),
            ];
            for view in views {
                assert!(!view.is_displayed(&browser).await.unwrap(), "{}", view.view_name());
            }
        }
    }

    mod fill_tests {
        use super::*;

        #[tokio::test]
        async fn test_edit_description() {
            let driver = Arc::new(MockDriver::new());
            let input = driver.add_root(MockElement::new("input").id("description").value("old"));
            let identifier = driver.add_root(MockElement::new("input").id("custom_1"));
            let browser = browser(&driver);

            let view = EditView::new();
            let changed = view
                .fill(&browser, &json!({"form": {"description": "web tier"}}))
                .await
                .unwrap();
            assert!(changed);
            assert_eq!(driver.value_of(input), "web tier");
            assert!(!driver.was_called(&format!("send_keys:mock-{identifier}")));
        }

        #[tokio::test]
        async fn test_unchanged_value_reports_no_change() {
            let driver = Arc::new(MockDriver::new());
            let _ = driver.add_root(MockElement::new("input").id("description").value("web tier"));
            let browser = browser(&driver);

            let changed = EditView::new()
                .fill(&browser, &json!({"form": {"description": "web tier"}}))
                .await
                .unwrap();
            assert!(!changed);
            assert!(driver.history().is_empty());
        }

        #[tokio::test]
        async fn test_save_button_is_read_only() {
            let driver = Arc::new(MockDriver::new());
            let _ = driver.add_root(MockElement::new("button").text("Save"));
            let browser = browser(&driver);
            let err = SetOwnershipView::new()
                .fill(&browser, &json!({"form": {"save_button": "Save"}}))
                .await
                .unwrap_err();
            assert!(matches!(err, crate::result::ViewError::ReadOnly { .. }));
        }
    }
}
