//! The entity a view is opened for.

use serde::{Deserialize, Serialize};

/// VM or instance the current view operates on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmContext {
    /// VM/instance name
    pub name: String,
    /// Template (image) the VM is provisioned from
    pub template_name: String,
    /// Provider owning the template
    pub provider_name: String,
}

impl VmContext {
    /// Create a context for `name`
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the template
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template_name = template.into();
        self
    }

    /// Set the provider
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider_name = provider.into();
        self
    }
}
