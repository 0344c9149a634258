//! Scrape coordinator - the public entry point
//!
//! This module sequences the pipeline for each URL:
//! robots.txt admission, rate-limited fetch (plain or rendered), then
//! content extraction. Every failure is folded into a sentinel
//! [`FetchResult`], so one bad URL never affects the others in a batch.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::crawler::parser::ContentExtractor;
use crate::crawler::render::{renderer_from_config, Renderer};
use crate::crawler::result::FetchResult;
use crate::robots::RobotsGate;
use crate::state::RateLimiter;
use crate::SumiError;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Main scraper structure
///
/// Owns the politeness state (robots.txt cache and per-origin rate limiter)
/// for its lifetime; two scrapers do not coordinate with each other.
pub struct Scraper {
    robots: RobotsGate,
    fetcher: Fetcher,
    extractor: ContentExtractor,
    limiter: Arc<RateLimiter>,
    user_agent: String,
    max_concurrent: usize,
}

impl Scraper {
    /// Creates a scraper, choosing the renderer from `config.render`
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to scrape
    /// * `Err(SumiError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, SumiError> {
        let renderer = renderer_from_config(&config.render, &config.scraper.user_agent);
        Self::with_renderer(config, renderer)
    }

    /// Creates a scraper with an explicit renderer
    ///
    /// Pages go through `renderer` whenever it reports itself available.
    pub fn with_renderer(config: Config, renderer: Arc<dyn Renderer>) -> Result<Self, SumiError> {
        let client = build_http_client(&config.scraper)?;
        let limiter = Arc::new(RateLimiter::new(config.scraper.min_request_interval()));

        let fetcher = Fetcher::new(
            client.clone(),
            Arc::clone(&limiter),
            renderer,
            &config.scraper,
        );

        Ok(Self {
            robots: RobotsGate::new(client),
            fetcher,
            extractor: ContentExtractor::new(config.scraper.summarize),
            limiter,
            user_agent: config.scraper.user_agent,
            max_concurrent: config.scraper.max_concurrent,
        })
    }

    /// Returns the rate limiter shared by all fetches of this scraper
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Returns the robots.txt gate of this scraper
    pub fn robots(&self) -> &RobotsGate {
        &self.robots
    }

    /// Scrapes a single URL
    ///
    /// # Returns
    ///
    /// * The extracted content on success
    /// * [`FetchResult::denied`] if robots.txt forbids the URL (no page request is made)
    /// * [`FetchResult::failed`] if the page could not be fetched
    pub async fn scrape_one(&self, url: &str) -> FetchResult {
        tracing::info!("Scraping {}...", url);

        let base_url = match Url::parse(url) {
            Ok(base_url) => base_url,
            Err(e) => {
                tracing::warn!("Invalid URL {}: {}", url, e);
                return FetchResult::failed(url);
            }
        };

        if !self.robots.can_fetch(url, &self.user_agent).await {
            tracing::info!("URL {} disallowed by robots.txt", url);
            return FetchResult::denied();
        }

        let markup = if self.fetcher.renders() {
            self.fetcher.fetch_rendered(url).await
        } else {
            self.fetcher.fetch(url).await
        };

        match markup {
            Some(markup) => self.extractor.extract(&markup, &base_url),
            None => FetchResult::failed(url),
        }
    }

    /// Scrapes every URL, up to `max-concurrent` at a time
    ///
    /// Requests to the same origin are still spaced by the rate limiter.
    /// Every input URL appears in the returned map; duplicates collapse.
    pub async fn scrape_many<I, S>(&self, urls: I) -> HashMap<String, FetchResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        stream::iter(urls.into_iter().map(Into::into))
            .map(|url: String| async move {
                let result = self.scrape_one(&url).await;
                (url, result)
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await
    }
}

/// Scrapes `urls` with a scraper built from `config`
///
/// # Example
///
/// ```no_run
/// use sumi_scrape::config::Config;
/// use sumi_scrape::crawler::scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let results = scrape(Config::default(), vec!["https://www.rust-lang.org/"]).await?;
/// for (url, result) in results {
///     println!("{}: {}", url, result.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn scrape<I, S>(config: Config, urls: I) -> Result<HashMap<String, FetchResult>, SumiError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let scraper = Scraper::new(config)?;
    Ok(scraper.scrape_many(urls).await)
}
