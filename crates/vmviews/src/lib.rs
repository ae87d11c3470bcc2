//! vmviews: page objects for the VM and instance screens of a management
//! appliance.
//!
//! Views are declarative: each one names the widgets of a screen and where
//! to find them. Filling a view from a nested JSON/YAML document walks its
//! children in declaration order; reading it produces the same shape.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ views        │──►│ widget       │──►│ Browser      │──►│ ViewDriver   │
//! │ (page tree)  │   │ (controls)   │   │ (auto-wait,  │   │ mock / CDP   │
//! │              │   │              │   │  cache)      │   │              │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use vmviews::{Browser, MockDriver, ProvisionView, View, ViewConfig, VmContext};
//!
//! # async fn run() -> vmviews::ViewResult<()> {
//! let config = ViewConfig::new().with_base_url("https://appliance.example.com");
//! let browser = Browser::new(MockDriver::new(), config);
//! let context = VmContext::new("web-01")
//!     .with_template("rhel-7")
//!     .with_provider("vsphere65");
//! let view = ProvisionView::new(context, browser.version())?;
//! let _ = view
//!     .fill(&browser, &json!({"form": {"catalog": {"vm_name": "web-01"}}}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod browser;
mod catalog;
#[cfg(feature = "browser")]
mod chromium;
mod config;
mod context;
mod driver;
mod locator;
pub mod mock;
mod result;
mod version;
mod view;
pub mod views;
pub mod widget;

pub use browser::Browser;
pub use catalog::{ViewCatalog, ViewFactory};
#[cfg(feature = "browser")]
pub use chromium::ChromiumDriver;
pub use config::{ViewConfig, DEFAULT_TEMPLATE_SETTLE_MS};
pub use context::VmContext;
pub use driver::{DriverConfig, ElementHandle, ViewDriver};
pub use locator::{
    Locator, LocatorOptions, Selector, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
pub use mock::{MockDriver, MockElement};
pub use result::{ViewError, ViewResult};
pub use version::{Version, VersionPick};
pub use view::{activate_tab, Child, ChildDescriptor, View, ViewDescriptor};
pub use views::{
    LoggedInPage, ProvisionForm, ProvisionView, VmDetailsEntities, VmEntities, VmToolbar,
};
pub use widget::{Widget, WidgetDescriptor, WidgetKind};
