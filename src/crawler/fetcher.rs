//! HTTP fetcher implementation
//!
//! This module handles all page requests for the scraper, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - Per-origin rate limiting before every attempt
//! - Retry with exponential backoff for transient failures
//! - Delegating to a [`Renderer`] for script-dependent pages

use crate::config::ScraperConfig;
use crate::crawler::render::Renderer;
use crate::state::RateLimiter;
use crate::SumiError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// The timeout covers the whole request, so a stalled attempt is abandoned
/// and counted as a failure.
///
/// # Example
///
/// ```no_run
/// use sumi_scrape::config::ScraperConfig;
/// use sumi_scrape::crawler::build_http_client;
///
/// let client = build_http_client(&ScraperConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ScraperConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .connect_timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Delay before the retry that follows failed attempt `attempt` (0-based)
///
/// `unit * 2^attempt`: with a one second unit, 1s, 2s, 4s, ...
pub fn backoff_delay(unit: Duration, attempt: u32) -> Duration {
    unit.saturating_mul(2u32.saturating_pow(attempt))
}

/// Retrieves raw page markup
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return body |
/// | HTTP 4xx/5xx | Retry after backoff |
/// | Timeout | Retry after backoff |
/// | Connection error | Retry after backoff |
/// | Attempts exhausted | Log error, return `None` |
pub struct Fetcher {
    client: Client,
    limiter: Arc<RateLimiter>,
    renderer: Arc<dyn Renderer>,
    max_retries: u32,
    retry_backoff: Duration,
    timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher sharing `limiter` with every other fetch of the scraper
    pub fn new(
        client: Client,
        limiter: Arc<RateLimiter>,
        renderer: Arc<dyn Renderer>,
        config: &ScraperConfig,
    ) -> Self {
        Self {
            client,
            limiter,
            renderer,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff(),
            timeout: config.timeout(),
        }
    }

    /// Whether pages go through the renderer instead of plain HTTP
    pub fn renders(&self) -> bool {
        self.renderer.is_available()
    }

    /// Fetches `url`, retrying failed attempts with exponential backoff
    ///
    /// # Returns
    ///
    /// * `Some(String)` - The response body of the first successful attempt
    /// * `None` - The URL could not be fetched
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", url, e);
                return None;
            }
        };

        for attempt in 0..self.max_retries {
            self.limiter.await_turn(&parsed).await;

            match self.fetch_once(&parsed).await {
                Ok(body) => {
                    tracing::debug!("Fetched {} on attempt {}", url, attempt + 1);
                    return Some(body);
                }
                Err(e) => {
                    tracing::warn!(
                        "Attempt {}/{}: Error fetching {}: {}",
                        attempt + 1,
                        self.max_retries,
                        url,
                        e
                    );

                    if attempt + 1 < self.max_retries {
                        tokio::time::sleep(backoff_delay(self.retry_backoff, attempt)).await;
                    }
                }
            }
        }

        tracing::error!(
            "Failed to fetch {} after {} attempts.",
            url,
            self.max_retries
        );
        None
    }

    /// Fetches the script-rendered document of `url`
    ///
    /// A single attempt; any rendering failure yields `None`.
    pub async fn fetch_rendered(&self, url: &str) -> Option<String> {
        if !self.renderer.is_available() {
            tracing::warn!("JavaScript rendering is disabled.");
            return None;
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Error fetching {} with JavaScript: {}", url, e);
                return None;
            }
        };

        self.limiter.await_turn(&parsed).await;

        match self.renderer.render(&parsed, self.timeout).await {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::error!("Error fetching {} with JavaScript: {}", url, e);
                None
            }
        }
    }

    /// Performs a single GET request
    async fn fetch_once(&self, url: &Url) -> Result<String, SumiError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| SumiError::from_request(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SumiError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SumiError::from_request(url.as_str(), e))
    }
}
