//! Provisioning: image selection followed by the tabbed request form.
//!
//! The form is two pages. [`ProvisionForm::before_fill`] completes the first
//! (picking the template row from the image table and pressing Continue)
//! before the tabs of the second page are filled.

use super::base::LoggedInPage;
use crate::browser::Browser;
use crate::context::VmContext;
use crate::locator::Selector;
use crate::result::{ViewError, ViewResult};
use crate::version::{Version, VersionPick};
use crate::view::{children, Child, View};
use crate::widget::{
    BootstrapSelect, Button, Calendar, Checkbox, CheckboxSelect, Table, Text, TextInput, TreeView,
    Widget,
};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Fill key naming the template to provision from
pub const TEMPLATE_NAME_KEY: &str = "template_name";

/// Defines a form tab: a struct of widgets plus its [`View`] impl.
macro_rules! tab_view {
    (
        $(#[$meta:meta])*
        $name:ident, $view_name:literal, $tab:literal {
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
            /// Create the tab
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

            fn tab_name(&self) -> Option<&str> {
                Some($tab)
            }

            fn children(&self) -> Vec<(&str, Child<'_>)> {
                children![self; $(Widget $field),*]
            }
        }
    };
}

tab_view! {
    /// Requester details
    RequestTab, "request", "Request" {
        /// Owner e-mail
        email: TextInput = TextInput::by_name("requester__owner_email"),
        /// Owner first name
        first_name: TextInput = TextInput::by_name("requester__owner_first_name"),
        /// Owner last name
        last_name: TextInput = TextInput::by_name("requester__owner_last_name"),
        /// Request notes
        notes: TextInput = TextInput::by_name("requester__request_notes"),
        /// Owner's manager
        manager_name: TextInput = TextInput::by_name("requester__owner_manager"),
    }
}

/// Tags applied to the new VM
#[derive(Debug)]
pub struct PurposeTab {
    /// Checkbox list before 5.7, tree view from 5.7
    pub apply_tags: Box<dyn Widget>,
}

impl PurposeTab {
    /// Create the tab for `version`
    pub fn new(version: &Version) -> ViewResult<Self> {
        let apply_tags = VersionPick::<Box<dyn Widget>>::new()
            .with(
                Version::lowest(),
                Box::new(CheckboxSelect::new(Selector::xpath(
                    "//div[@id=\"all_tags_treebox\"]//ul",
                ))),
            )
            .since("5.7", Box::new(TreeView::bootstrap("all_tags_treebox")))?
            .into_pick(version)?;
        Ok(Self { apply_tags })
    }
}

#[async_trait]
impl View for PurposeTab {
    fn view_name(&self) -> &str {
        "purpose"
    }

    fn tab_name(&self) -> Option<&str> {
        Some("Purpose")
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        vec![("apply_tags", Child::Widget(self.apply_tags.as_ref()))]
    }
}

tab_view! {
    /// Catalog: source, naming and provision type
    CatalogTab, "catalog", "Catalog" {
        /// Number of instances
        num_instances: BootstrapSelect = BootstrapSelect::new("service__number_of_vms"),
        /// VM name
        vm_name: TextInput = TextInput::by_name("service__vm_name"),
        /// VM description
        vm_description: TextInput = TextInput::by_name("service__vm_description"),
        /// Filter for the catalog table
        vm_filter: BootstrapSelect = BootstrapSelect::new("service__vm_filter"),
        /// Number of VMs
        num_vms: BootstrapSelect = BootstrapSelect::new("service__number_of_vms"),
        /// Source catalog table
        catalog_name: Table = Table::xpath("//div[@id=\"prov_vm_div\"]/table"),
        /// Provision type
        provision_type: BootstrapSelect = BootstrapSelect::new("service__provision_type"),
        /// Linked clone
        linked_clone: TextInput = TextInput::by_name("service__linked_clone"),
        /// PXE server
        pxe_server: BootstrapSelect = BootstrapSelect::new("service__pxe_server_id"),
        /// PXE image table
        pxe_image: Table = Table::xpath("//div[@id=\"prov_pxe_img_div\"]/table"),
        /// ISO image table
        iso_file: Table = Table::xpath("//div[@id=\"prov_iso_img_div\"]/table"),
    }
}

tab_view! {
    /// Placement, cloud and infrastructure
    EnvironmentTab, "environment", "Environment" {
        /// Choose placement automatically
        automatic_placement: Checkbox = Checkbox::by_id("environment__placement_auto"),
        /// Availability zone (cloud)
        availability_zone: BootstrapSelect =
            BootstrapSelect::new("environment__placement_availability_zone"),
        /// Cloud network (cloud)
        cloud_network: BootstrapSelect = BootstrapSelect::new("environment__cloud_network"),
        /// Cloud subnet (cloud)
        cloud_subnet: BootstrapSelect = BootstrapSelect::new("environment__cloud_subnet"),
        /// Security groups (cloud)
        security_groups: BootstrapSelect = BootstrapSelect::new("environment__security_groups"),
        /// Resource group (cloud)
        resource_groups: BootstrapSelect = BootstrapSelect::new("environment__resource_group"),
        /// Public IP address (cloud)
        public_ip_address: BootstrapSelect =
            BootstrapSelect::new("environment__floating_ip_address"),
        /// Provider (infra)
        provider_name: BootstrapSelect = BootstrapSelect::new("environment__placement_ems_name"),
        /// Datacenter (infra)
        datacenter: BootstrapSelect = BootstrapSelect::new("environment__placement_dc_name"),
        /// Cluster (infra)
        cluster: BootstrapSelect = BootstrapSelect::new("environment__placement_cluster_name"),
        /// Resource pool (infra)
        resource_pool: BootstrapSelect = BootstrapSelect::new("environment__placement_rp_name"),
        /// Folder (infra)
        folder: BootstrapSelect = BootstrapSelect::new("environment__placement_folder_name"),
        /// Host filter (infra)
        host_filter: BootstrapSelect = BootstrapSelect::new("environment__host_filter"),
        /// Host table (infra)
        host_name: Table = Table::xpath("//div[@id=\"prov_host_div\"]/table"),
        /// Create a datastore (infra)
        datastore_create: TextInput = TextInput::by_name("environment__new_datastore_create"),
        /// Datastore filter (infra)
        datastore_filter: BootstrapSelect = BootstrapSelect::new("environment__ds_filter"),
        /// Datastore table (infra)
        datastore_name: Table = Table::xpath("//div[@id=\"prov_ds_div\"]/table"),
    }
}

tab_view! {
    /// CPU, memory and limits
    HardwareTab, "hardware", "Hardware" {
        /// Sockets
        num_sockets: BootstrapSelect = BootstrapSelect::new("hardware__number_of_sockets"),
        /// Cores per socket
        cores_per_socket: BootstrapSelect = BootstrapSelect::new("hardware__cores_per_socket"),
        /// CPUs
        num_cpus: BootstrapSelect = BootstrapSelect::new("hardware__number_of_cpus"),
        /// Memory
        memory: BootstrapSelect = BootstrapSelect::new("hardware__vm_memory"),
        /// CPU limit
        vm_limit_cpu: TextInput = TextInput::by_name("hardware__cpu_limit"),
        /// Memory limit
        vm_limit_memory: TextInput = TextInput::by_name("hardware__memory_limit"),
        /// CPU reservation
        vm_reserve_cpu: TextInput = TextInput::by_name("hardware__cpu_reserve"),
        /// Memory reservation
        vm_reserve_memory: TextInput = TextInput::by_name("hardware__memory_reserve"),
    }
}

tab_view! {
    /// Network adapter
    NetworkTab, "network", "Network" {
        /// vLAN
        vlan: BootstrapSelect = BootstrapSelect::new("network__vlan"),
    }
}

/// Instance properties (cloud)
#[derive(Debug)]
pub struct PropertiesTab {
    /// Instance type
    pub instance_type: BootstrapSelect,
    /// Guest access key pair
    pub guest_keypair: BootstrapSelect,
    /// Monitoring
    pub hardware_monitoring: BootstrapSelect,
    /// Boot disk size
    pub boot_disk_size: BootstrapSelect,
    /// GCE pre-emptible flag, from 5.7
    pub is_preemtible: Option<TextInput>,
}

impl PropertiesTab {
    /// Create the tab for `version`
    pub fn new(version: &Version) -> ViewResult<Self> {
        let is_preemtible = VersionPick::new()
            .with(Version::lowest(), None)
            .since("5.7", Some(TextInput::by_name("hardware__is_preemptible")))?
            .into_pick(version)?;
        Ok(Self {
            instance_type: BootstrapSelect::new("hardware__instance_type"),
            guest_keypair: BootstrapSelect::new("hardware__guest_access_key_pair"),
            hardware_monitoring: BootstrapSelect::new("hardware__monitoring"),
            boot_disk_size: BootstrapSelect::new("hardware__boot_disk_size"),
            is_preemtible,
        })
    }
}

#[async_trait]
impl View for PropertiesTab {
    fn view_name(&self) -> &str {
        "properties"
    }

    fn tab_name(&self) -> Option<&str> {
        Some("Properties")
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        let mut out = children![
            self;
            Widget instance_type,
            Widget guest_keypair,
            Widget hardware_monitoring,
            Widget boot_disk_size,
        ];
        if let Some(ref input) = self.is_preemtible {
            out.push(("is_preemtible", Child::Widget(input)));
        }
        out
    }
}

tab_view! {
    /// Guest customization
    CustomizeTab, "customize", "Customize" {
        /// DNS servers
        dns_servers: TextInput = TextInput::by_name("customize__dns_servers"),
        /// DNS suffixes
        dns_suffixes: TextInput = TextInput::by_name("customize__dns_suffixes"),
        /// Customization type
        customize_type: BootstrapSelect = BootstrapSelect::new("customize__sysprep_enabled"),
        /// Customization specification table
        specification_name: Table = Table::xpath("//div[@id=\"prov_vc_div\"]/table"),
        /// Administrator user name
        admin_username: TextInput = TextInput::by_name("customize__root_username"),
        /// Administrator password
        admin_password: TextInput = TextInput::by_name("customize__root_password"),
        /// Linux host name
        linux_host_name: TextInput = TextInput::by_name("customize__linux_host_name"),
        /// Linux domain name
        linux_domain_name: TextInput = TextInput::by_name("customize__linux_domain_name"),
        /// IP address
        ip_address: TextInput = TextInput::by_name("customize__ip_addr"),
        /// Subnet mask
        subnet_mask: TextInput = TextInput::by_name("customize__subnet_mask"),
        /// Gateway
        gateway: TextInput = TextInput::by_name("customize__gateway"),
        /// Customization template table
        custom_template: Table = Table::xpath("//div[@id=\"prov_template_div\"]/table"),
        /// Host name
        hostname: TextInput = TextInput::by_name("customize__hostname"),
    }
}

tab_view! {
    /// When to provision and retire
    ScheduleTab, "schedule", "Schedule" {
        /// Provision date
        provision_date: Calendar = Calendar::by_name("miq_date_1"),
        /// Start hour
        provision_start_hour: BootstrapSelect = BootstrapSelect::new("start_hour"),
        /// Start minute
        provision_start_min: BootstrapSelect = BootstrapSelect::new("start_min"),
        /// Power on after provisioning
        power_on: TextInput = TextInput::by_name("schedule__vm_auto_start"),
        /// Time until retirement
        retirement: BootstrapSelect = BootstrapSelect::new("schedule__retirement"),
        /// Retirement warning
        retirement_warning: BootstrapSelect = BootstrapSelect::new("schedule__retirement_warn"),
        /// Stateless (infra)
        stateless: TextInput = TextInput::by_name("schedule__stateless"),
    }
}

/// Image selection page followed by the tabbed request form
#[derive(Debug)]
pub struct ProvisionForm {
    context: VmContext,
    /// Image (template) table of the first page
    pub image_table: Table,
    /// Continue, on the image page
    pub continue_button: Button,
    /// Submit, on the tabbed page
    pub submit_button: Button,
    /// Cancel
    pub cancel_button: Button,
    /// Request tab
    pub request: RequestTab,
    /// Purpose tab
    pub purpose: PurposeTab,
    /// Catalog tab
    pub catalog: CatalogTab,
    /// Environment tab
    pub environment: EnvironmentTab,
    /// Hardware tab
    pub hardware: HardwareTab,
    /// Network tab
    pub network: NetworkTab,
    /// Properties tab
    pub properties: PropertiesTab,
    /// Customize tab
    pub customize: CustomizeTab,
    /// Schedule tab
    pub schedule: ScheduleTab,
}

impl ProvisionForm {
    /// Create the form for provisioning `context` on an appliance of `version`
    pub fn new(context: VmContext, version: &Version) -> ViewResult<Self> {
        Ok(Self {
            context,
            image_table: Table::xpath("//div[@id=\"pre_prov_div\"]//table"),
            continue_button: Button::new("Continue"),
            submit_button: Button::new("Submit"),
            cancel_button: Button::new("Cancel"),
            request: RequestTab::new(),
            purpose: PurposeTab::new(version)?,
            catalog: CatalogTab::new(),
            environment: EnvironmentTab::new(),
            hardware: HardwareTab::new(),
            network: NetworkTab::new(),
            properties: PropertiesTab::new(version)?,
            customize: CustomizeTab::new(),
            schedule: ScheduleTab::new(),
        })
    }

    /// The VM being provisioned
    #[must_use]
    pub const fn context(&self) -> &VmContext {
        &self.context
    }

    /// Pick `template` of `provider` in the image table and continue to the
    /// tabbed page
    pub async fn select_template(
        &self,
        browser: &Browser,
        template: &str,
        provider: &str,
    ) -> ViewResult<()> {
        let row = self
            .image_table
            .row(browser, &[("name", template), ("provider", provider)])
            .await
            .map_err(|e| match e {
                ViewError::RowNotFound { .. } => ViewError::TemplateNotFound {
                    template: template.to_string(),
                    provider: provider.to_string(),
                },
                other => other,
            })?;
        tracing::info!(%template, %provider, "selecting provisioning image");
        row.click(browser).await?;
        self.continue_button.click(browser).await?;
        // the tabbed page renders without a usable readiness signal
        browser.pause(browser.config().template_settle()).await;
        browser.flush_widget_cache();
        Ok(())
    }
}

#[async_trait]
impl View for ProvisionForm {
    fn view_name(&self) -> &str {
        "provision_form"
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        children![
            self;
            Widget image_table,
            Widget continue_button,
            Widget submit_button,
            Widget cancel_button,
            View request,
            View purpose,
            View catalog,
            View environment,
            View hardware,
            View network,
            View properties,
            View customize,
            View schedule,
        ]
    }

    /// Completes the image page; `template_name` in `values` overrides the
    /// context's template and is consumed.
    async fn before_fill(
        &self,
        browser: &Browser,
        values: &mut Map<String, Value>,
    ) -> ViewResult<bool> {
        let template = match values.remove(TEMPLATE_NAME_KEY) {
            Some(Value::String(name)) => name,
            Some(Value::Null) | None => self.context.template_name.clone(),
            Some(other) => {
                return Err(ViewError::invalid_fill(
                    TEMPLATE_NAME_KEY,
                    format!("expected string, got {other}"),
                ))
            }
        };
        self.select_template(browser, &template, &self.context.provider_name)
            .await?;
        Ok(true)
    }
}

/// Provisioning page: title plus [`ProvisionForm`]
#[derive(Debug)]
pub struct ProvisionView {
    /// Shared page chrome
    pub page: LoggedInPage,
    /// Page title
    pub title: Text,
    /// Provisioning form
    pub form: ProvisionForm,
}

impl ProvisionView {
    /// Create the view for provisioning `context` on an appliance of `version`
    pub fn new(context: VmContext, version: &Version) -> ViewResult<Self> {
        Ok(Self {
            page: LoggedInPage::new(),
            title: Text::css("#explorer_title_text"),
            form: ProvisionForm::new(context, version)?,
        })
    }
}

#[async_trait]
impl View for ProvisionView {
    fn view_name(&self) -> &str {
        "provision"
    }

    fn children(&self) -> Vec<(&str, Child<'_>)> {
        let mut out = self.page.children();
        out.extend(children![self; Widget title, View form]);
        out
    }

    async fn is_displayed(&self, _browser: &Browser) -> ViewResult<bool> {
        Ok(false)
    }
}
