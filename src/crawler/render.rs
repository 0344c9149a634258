//! Script rendering capability
//!
//! Pages that build their content with JavaScript are fetched through a
//! [`Renderer`]. Whether a working renderer exists is decided once, when the
//! scraper is built: if rendering is requested but no headless browser can be
//! used, a [`NullRenderer`] is installed and the plain HTTP path is used.

use crate::config::RenderConfig;
use crate::SumiError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Produces the fully rendered markup of a page
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Whether this renderer can actually render pages
    fn is_available(&self) -> bool {
        true
    }

    /// Navigates to `url` and returns the rendered document
    ///
    /// Navigation is bounded by `timeout`. Each call uses its own browsing
    /// context, torn down before returning whether or not rendering succeeded.
    async fn render(&self, url: &Url, timeout: Duration) -> Result<String, SumiError>;
}

/// Renderer used when script rendering is disabled or unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

#[async_trait]
impl Renderer for NullRenderer {
    fn is_available(&self) -> bool {
        false
    }

    async fn render(&self, url: &Url, _timeout: Duration) -> Result<String, SumiError> {
        Err(SumiError::Render {
            url: url.to_string(),
            message: "JavaScript rendering is disabled".to_string(),
        })
    }
}

/// Picks the renderer for a configuration
///
/// Falls back to [`NullRenderer`] with a warning when rendering is enabled
/// but no browser can be used.
pub fn renderer_from_config(
    config: &RenderConfig,
    #[cfg_attr(not(feature = "render"), allow(unused_variables))] user_agent: &str,
) -> Arc<dyn Renderer> {
    if !config.enabled {
        return Arc::new(NullRenderer);
    }

    #[cfg(feature = "render")]
    {
        match chromium::ChromiumRenderer::detect(user_agent, config.endpoint.clone()) {
            Ok(renderer) => return Arc::new(renderer),
            Err(e) => {
                tracing::warn!("Headless browser unavailable ({}). JavaScript rendering disabled.", e);
            }
        }
    }

    #[cfg(not(feature = "render"))]
    {
        tracing::warn!(
            "Built without the `render` feature. JavaScript rendering disabled."
        );
    }

    Arc::new(NullRenderer)
}

#[cfg(feature = "render")]
pub use chromium::ChromiumRenderer;

#[cfg(feature = "render")]
mod chromium {
    use super::Renderer;
    use crate::SumiError;
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
    use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
    use chromiumoxide::cdp::browser_protocol::target::{
        CreateBrowserContextParams, CreateTargetParams,
    };
    use chromiumoxide::Page;
    use futures::StreamExt;
    use std::future::Future;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use tokio::time::Instant;
    use url::Url;

    static PROFILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    /// Renders pages with headless Chromium
    ///
    /// Without an endpoint a fresh browser with its own profile directory is
    /// launched per page. With an endpoint the renderer attaches to that
    /// browser. Either way each page gets its own browser context, so no
    /// cookies or storage are shared between renders.
    #[derive(Debug, Clone)]
    pub struct ChromiumRenderer {
        user_agent: String,
        endpoint: Option<String>,
    }

    /// A browser session owned by one render call
    struct Session {
        browser: Browser,
        handler: JoinHandle<()>,
        profile_dir: Option<PathBuf>,
        context: Option<BrowserContextId>,
    }

    impl ChromiumRenderer {
        pub fn new(user_agent: &str, endpoint: Option<String>) -> Self {
            Self {
                user_agent: user_agent.to_string(),
                endpoint,
            }
        }

        /// Builds a renderer after checking a browser can be used
        ///
        /// For local launches this fails when no Chrome executable is found.
        pub fn detect(user_agent: &str, endpoint: Option<String>) -> Result<Self, SumiError> {
            let renderer = Self::new(user_agent, endpoint);
            if renderer.endpoint.is_none() {
                renderer.launch_config(None)?;
            }
            Ok(renderer)
        }

        fn launch_config(&self, profile_dir: Option<PathBuf>) -> Result<BrowserConfig, SumiError> {
            let mut builder = BrowserConfig::builder()
                .request_timeout(Duration::from_secs(30))
                .arg(format!("--user-agent={}", self.user_agent))
                .arg("--no-first-run")
                .arg("--no-default-browser-check")
                .arg("--disable-extensions")
                .arg("--mute-audio");

            if let Some(dir) = profile_dir {
                builder = builder.user_data_dir(dir);
            }

            builder.build().map_err(|message| SumiError::Render {
                url: String::new(),
                message,
            })
        }

        async fn open(&self, url: &Url) -> Result<Session, SumiError> {
            let (browser, mut handler, profile_dir) = match &self.endpoint {
                Some(endpoint) => {
                    let (browser, handler) = Browser::connect(endpoint.clone())
                        .await
                        .map_err(|e| render_error(url, e))?;
                    (browser, handler, None)
                }
                None => {
                    let profile_dir = std::env::temp_dir().join(format!(
                        "sumi-scrape-{}-{}",
                        std::process::id(),
                        PROFILE_COUNTER.fetch_add(1, Ordering::Relaxed)
                    ));
                    let config = self.launch_config(Some(profile_dir.clone()))?;
                    let (browser, handler) = Browser::launch(config)
                        .await
                        .map_err(|e| render_error(url, e))?;
                    (browser, handler, Some(profile_dir))
                }
            };

            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::debug!("Browser handler error: {:?}", e);
                    }
                }
            });

            Ok(Session {
                browser,
                handler,
                profile_dir,
                context: None,
            })
        }

        /// Opens a page in a fresh browser context and reads its markup
        ///
        /// The context id is stored on the session before navigating, so it
        /// is disposed even when this future is cancelled part way.
        async fn capture(&self, session: &mut Session, url: &Url) -> Result<String, SumiError> {
            let context = session
                .browser
                .create_browser_context(CreateBrowserContextParams::default())
                .await
                .map_err(|e| render_error(url, e))?;
            session.context = Some(context.clone());

            let target = blank_target(context).map_err(|message| SumiError::Render {
                url: url.to_string(),
                message,
            })?;
            let page = session
                .browser
                .new_page(target)
                .await
                .map_err(|e| render_error(url, e))?;

            let captured = load(&page, url, &self.user_agent)
                .await
                .map_err(|e| render_error(url, e));

            if let Err(e) = page.close().await {
                tracing::debug!("Failed to close page for {}: {}", url, e);
            }
            captured
        }

        async fn close(&self, mut session: Session) {
            if let Some(context) = session.context.take() {
                if let Err(e) = session.browser.dispose_browser_context(context).await {
                    tracing::debug!("Failed to dispose browser context: {}", e);
                }
            }

            if self.endpoint.is_none() {
                if let Err(e) = session.browser.close().await {
                    tracing::debug!("Failed to close browser: {}", e);
                }
                let _ = session.browser.wait().await;
            }
            session.handler.abort();

            if let Some(dir) = session.profile_dir {
                let _ = tokio::fs::remove_dir_all(dir).await;
            }
        }
    }

    fn render_error(url: &Url, e: chromiumoxide::error::CdpError) -> SumiError {
        SumiError::Render {
            url: url.to_string(),
            message: e.to_string(),
        }
    }

    /// Target for a blank tab inside `context`
    pub(super) fn blank_target(context: BrowserContextId) -> Result<CreateTargetParams, String> {
        CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context)
            .build()
    }

    async fn load(
        page: &Page,
        url: &Url,
        user_agent: &str,
    ) -> Result<String, chromiumoxide::error::CdpError> {
        page.set_user_agent(SetUserAgentOverrideParams::new(user_agent))
            .await?;
        page.goto(url.as_str()).await?;
        page.wait_for_navigation().await?;
        page.content().await
    }

    /// Runs `step` unless `deadline` passes first
    async fn before<T>(
        deadline: Instant,
        timeout: Duration,
        url: &Url,
        step: impl Future<Output = Result<T, SumiError>>,
    ) -> Result<T, SumiError> {
        match tokio::time::timeout_at(deadline, step).await {
            Ok(result) => result,
            Err(_) => Err(SumiError::Render {
                url: url.to_string(),
                message: format!("rendering timed out after {}ms", timeout.as_millis()),
            }),
        }
    }

    #[async_trait]
    impl Renderer for ChromiumRenderer {
        /// Browser startup, navigation and capture share one `timeout`
        /// budget; teardown runs after it regardless of the outcome.
        async fn render(&self, url: &Url, timeout: Duration) -> Result<String, SumiError> {
            let deadline = Instant::now() + timeout;

            let mut session = before(deadline, timeout, url, self.open(url)).await?;
            let outcome = before(deadline, timeout, url, self.capture(&mut session, url)).await;
            self.close(session).await;

            outcome
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_renderer_is_unavailable() {
        let renderer = NullRenderer;
        assert!(!renderer.is_available());

        let url = Url::parse("https://example.com/").unwrap();
        let result = renderer.render(&url, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(SumiError::Render { .. })));
    }

    #[test]
    fn test_disabled_config_selects_null_renderer() {
        let renderer = renderer_from_config(&RenderConfig::default(), "TestBot/1.0");
        assert!(!renderer.is_available());
    }

    #[cfg(not(feature = "render"))]
    #[test]
    fn test_enabled_without_feature_degrades() {
        let config = RenderConfig {
            enabled: true,
            endpoint: None,
        };
        let renderer = renderer_from_config(&config, "TestBot/1.0");
        assert!(!renderer.is_available());
    }
}
