//! Real browser driver over the Chrome DevTools Protocol.
//!
//! Elements are addressed by a `data-vmviews-ref` attribute stamped on them
//! the first time a query returns them; every element operation is a short
//! script that looks the element up again by that attribute.

use crate::driver::{DriverConfig, ElementHandle, ViewDriver};
use crate::locator::{js_str, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;

const REF_ATTR: &str = "data-vmviews-ref";

/// Chromium controlled through chromiumoxide
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Mutex<CdpBrowser>,
    page: CdpPage,
    handler: tokio::task::JoinHandle<()>,
}

#[derive(Deserialize)]
struct Attribute {
    value: Option<String>,
}

impl ChromiumDriver {
    /// Launch a browser and open a blank page
    pub async fn launch(config: &DriverConfig) -> ViewResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .request_timeout(config.navigation_timeout);
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if config.ignore_https_errors {
            builder = builder.arg("--ignore-certificate-errors");
        }
        if let Some(ref path) = config.executable_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder
            .build()
            .map_err(|message| ViewError::BrowserLaunch { message })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| ViewError::BrowserLaunch {
                    message: e.to_string(),
                })?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ViewError::BrowserLaunch {
                message: e.to_string(),
            })?;
        tracing::info!(headless = config.headless, "chromium launched");

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler,
        })
    }

    /// Close the browser
    pub async fn close(self) -> ViewResult<()> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| ViewError::driver(e.to_string()))?;
        self.handler.abort();
        Ok(())
    }

    async fn eval<T: DeserializeOwned>(&self, script: &str) -> ViewResult<T> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| ViewError::driver(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| ViewError::driver(e.to_string()))
    }

    /// Run `body` with `el` bound to the element behind `handle`
    async fn on_element<T: DeserializeOwned>(
        &self,
        handle: &ElementHandle,
        body: &str,
    ) -> ViewResult<T> {
        self.eval(&format!(
            "(() => {{ {} if (!el) throw new Error('stale element ' + {}); return {body}; }})()",
            bind_element("el", &handle.id),
            js_str(&handle.id),
        ))
        .await
    }
}

fn bind_element(var: &str, id: &str) -> String {
    let css = format!("[{REF_ATTR}={}]", js_str(id));
    format!("const {var} = document.querySelector({});", js_str(&css))
}

fn find_script(selector: &Selector, scope: Option<&ElementHandle>) -> String {
    let root = scope.map_or_else(
        || "const root = document;".to_string(),
        |s| bind_element("root", &s.id),
    );
    format!(
        "(() => {{ {root} if (!root) throw new Error('stale scope'); \
         window.__vmviewsSeq = window.__vmviewsSeq || 0; \
         return {query}.map(el => {{ \
           if (!el.hasAttribute('{REF_ATTR}')) el.setAttribute('{REF_ATTR}', 'cdp-' + (++window.__vmviewsSeq)); \
           return {{ id: el.getAttribute('{REF_ATTR}'), tag_name: el.tagName.toLowerCase() }}; \
         }}); }})()",
        query = selector.to_query(),
    )
}

const NOTIFY_CHANGE: &str = "el.dispatchEvent(new Event('input', { bubbles: true })), \
     el.dispatchEvent(new Event('change', { bubbles: true }))";

#[async_trait]
impl ViewDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> ViewResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ViewError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> ViewResult<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| ViewError::driver(e.to_string()))?;
        Ok(url.unwrap_or_default())
    }

    async fn find_elements(
        &self,
        selector: &Selector,
        scope: Option<&ElementHandle>,
    ) -> ViewResult<Vec<ElementHandle>> {
        self.eval(&find_script(selector, scope)).await
    }

    async fn is_displayed(&self, element: &ElementHandle) -> ViewResult<bool> {
        self.on_element(
            element,
            "!!(el.offsetWidth || el.offsetHeight || el.getClientRects().length) \
             && getComputedStyle(el).visibility !== 'hidden'",
        )
        .await
    }

    async fn text(&self, element: &ElementHandle) -> ViewResult<String> {
        self.on_element(element, "(el.textContent || '').trim()").await
    }

    async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> ViewResult<Option<String>> {
        let attr: Attribute = self
            .on_element(
                element,
                &format!("{{ value: el.getAttribute({}) }}", js_str(name)),
            )
            .await?;
        Ok(attr.value)
    }

    async fn value(&self, element: &ElementHandle) -> ViewResult<String> {
        self.on_element(element, "String(el.value ?? '')").await
    }

    async fn is_selected(&self, element: &ElementHandle) -> ViewResult<bool> {
        self.on_element(element, "!!(el.checked || el.selected)").await
    }

    async fn click(&self, element: &ElementHandle) -> ViewResult<()> {
        tracing::trace!(element = %element.id, "cdp click");
        let _: bool = self
            .on_element(
                element,
                "(el.scrollIntoView({ block: 'center' }), el.click(), true)",
            )
            .await?;
        Ok(())
    }

    async fn clear(&self, element: &ElementHandle) -> ViewResult<()> {
        let _: bool = self
            .on_element(element, &format!("(el.value = '', {NOTIFY_CHANGE}, true)"))
            .await?;
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> ViewResult<()> {
        let _: bool = self
            .on_element(
                element,
                &format!(
                    "(el.focus(), el.value += {}, {NOTIFY_CHANGE}, true)",
                    js_str(text)
                ),
            )
            .await?;
        Ok(())
    }
}
