//! Page objects for the VM and instance screens.
//!
//! Every view embeds a [`LoggedInPage`] for the chrome shared by all screens
//! after login, then adds its own title, form or tables. Locator strings here
//! follow the appliance markup and are the contract with it.

mod base;
mod entities;
mod forms;
mod provision;
mod toolbar;

pub use base::LoggedInPage;
pub use entities::{VmDetailsEntities, VmEntities};
pub use base::{FLASH_XPATH, LOGGED_IN_AS_XPATH};
pub use forms::{
    EditForm, EditTagsForm, EditTagsView, EditView, ManagePoliciesForm, ManagePoliciesView,
    ManagementEngineForm, ManagementEngineView, PolicySimulationForm, PolicySimulationView,
    RetirementForm, RetirementView, RightSizeView, SetOwnershipForm, SetOwnershipView,
};
pub use provision::{
    CatalogTab, CustomizeTab, EnvironmentTab, HardwareTab, NetworkTab, PropertiesTab,
    ProvisionForm, ProvisionView, PurposeTab, RequestTab, ScheduleTab, TEMPLATE_NAME_KEY,
};
pub use toolbar::VmToolbar;
