//! Browser session wrapper used by every widget.
//!
//! [`Browser`] resolves [`Locator`]s through a [`ViewDriver`], auto-waiting
//! until an element shows up, and keeps a small cache of resolved handles.
//! The cache must be flushed whenever the page underneath changes without a
//! navigation (see [`Browser::flush_widget_cache`]).

use crate::config::ViewConfig;
use crate::driver::{ElementHandle, ViewDriver};
use crate::locator::Locator;
use crate::result::{ViewError, ViewResult};
use crate::version::Version;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// A browser session: driver, configuration and element cache
#[derive(Debug)]
pub struct Browser {
    driver: Arc<dyn ViewDriver>,
    config: ViewConfig,
    cache: Mutex<HashMap<String, ElementHandle>>,
}

impl Browser {
    /// Wrap a driver
    pub fn new(driver: impl ViewDriver + 'static, config: ViewConfig) -> Self {
        Self::with_driver(Arc::new(driver), config)
    }

    /// Wrap a shared driver
    #[must_use]
    pub fn with_driver(driver: Arc<dyn ViewDriver>, config: ViewConfig) -> Self {
        Self {
            driver,
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying driver
    #[must_use]
    pub fn driver(&self) -> &dyn ViewDriver {
        self.driver.as_ref()
    }

    /// Session configuration
    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Appliance version
    #[must_use]
    pub const fn version(&self) -> &Version {
        &self.config.appliance_version
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, ElementHandle>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Navigate to a path below the base URL (or an absolute URL)
    pub async fn navigate(&self, path: &str) -> ViewResult<()> {
        let url = self.config.url_for(path);
        tracing::debug!(%url, "navigate");
        self.flush_widget_cache();
        self.driver
            .navigate(&url)
            .await
            .map_err(|e| match e {
                ViewError::Navigation { .. } => e,
                other => ViewError::Navigation {
                    url: url.clone(),
                    message: other.to_string(),
                },
            })
    }

    /// All current matches, without waiting
    pub async fn elements(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
    ) -> ViewResult<Vec<ElementHandle>> {
        self.driver.find_elements(locator.selector(), scope).await
    }

    /// Resolve a single element, auto-waiting up to the locator timeout
    pub async fn element(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
    ) -> ViewResult<ElementHandle> {
        let key = cache_key(locator, scope);
        if let Some(handle) = self.cache().get(&key) {
            return Ok(handle.clone());
        }

        let options = locator.options();
        let timeout = options.timeout.unwrap_or_else(|| self.config.default_timeout());
        let poll = options
            .poll_interval
            .unwrap_or_else(|| self.config.poll_interval());
        let started = Instant::now();

        loop {
            let mut found = self.elements(locator, scope).await?;
            if options.visible {
                let mut visible = Vec::with_capacity(found.len());
                for handle in found {
                    if self.driver.is_displayed(&handle).await? {
                        visible.push(handle);
                    }
                }
                found = visible;
            }

            if found.len() > 1 && options.strict {
                return Err(ViewError::AmbiguousElement {
                    locator: locator.to_string(),
                    count: found.len(),
                });
            }
            if let Some(handle) = found.into_iter().next() {
                let _ = self.cache().insert(key, handle.clone());
                return Ok(handle);
            }
            if started.elapsed() >= timeout {
                tracing::debug!(%locator, ?timeout, "element not found");
                return Err(ViewError::ElementNotFound {
                    locator: locator.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(poll).await;
        }
    }

    /// True when any match is displayed right now
    pub async fn is_displayed(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
    ) -> ViewResult<bool> {
        for handle in self.elements(locator, scope).await? {
            if self.driver.is_displayed(&handle).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Resolve and click
    pub async fn click(&self, locator: &Locator, scope: Option<&ElementHandle>) -> ViewResult<()> {
        let handle = self.element(locator, scope).await?;
        tracing::debug!(%locator, "click");
        self.driver.click(&handle).await
    }

    /// Resolve and read trimmed text
    pub async fn text(
        &self,
        locator: &Locator,
        scope: Option<&ElementHandle>,
    ) -> ViewResult<String> {
        let handle = self.element(locator, scope).await?;
        self.driver.text(&handle).await
    }

    /// Fixed pause
    pub async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tracing::debug!(?duration, "pause");
            tokio::time::sleep(duration).await;
        }
    }

    /// Forget every cached element handle
    pub fn flush_widget_cache(&self) {
        let mut cache = self.cache();
        tracing::trace!(entries = cache.len(), "flush widget cache");
        cache.clear();
    }

    /// Number of cached element handles
    #[must_use]
    pub fn cached_elements(&self) -> usize {
        self.cache().len()
    }
}

// Visibility and strictness change which element resolves, so they are part
// of the key.
fn cache_key(locator: &Locator, scope: Option<&ElementHandle>) -> String {
    let options = locator.options();
    let flags = format!("[visible={},strict={}]", options.visible, options.strict);
    match scope {
        Some(parent) => format!("{}>{locator}{flags}", parent.id),
        None => format!("{locator}{flags}"),
    }
}
