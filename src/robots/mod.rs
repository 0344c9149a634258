//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching robots.txt files.
//! Policy lookups fail open: when a site's robots.txt cannot be retrieved the
//! URL is treated as allowed.

mod cache;
mod parser;

pub use cache::CachedRobots;
pub use parser::{product_token, ParsedRobots};

use crate::url::robots_url;
use crate::SumiError;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use tokio::sync::RwLock;
use url::Url;

/// Fetches and parses the robots.txt at `robots_url`
///
/// # Status Handling
///
/// | Response | Policy |
/// |----------|--------|
/// | 2xx | Parsed from the body |
/// | 401, 403 | Disallow all |
/// | Other 4xx | Allow all (no robots.txt) |
/// | 5xx, network error | `Err`, caller fails open |
///
/// # Returns
///
/// * `Ok(ParsedRobots)` - A definitive policy for the site
/// * `Err(SumiError)` - The policy could not be determined
pub async fn fetch_robots(client: &Client, robots_url: &Url) -> Result<ParsedRobots, SumiError> {
    let response = client
        .get(robots_url.as_str())
        .send()
        .await
        .map_err(|e| SumiError::from_request(robots_url.as_str(), e))?;

    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Ok(ParsedRobots::disallow_all());
    }

    if status.is_client_error() {
        return Ok(ParsedRobots::allow_all());
    }

    if !status.is_success() {
        return Err(SumiError::HttpStatus {
            url: robots_url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| SumiError::from_request(robots_url.as_str(), e))?;

    Ok(ParsedRobots::from_content(&body))
}

/// Admission control backed by each site's robots.txt
///
/// Policies are fetched lazily on first access and cached per robots.txt
/// location. Only definitive policies are cached; a failed lookup is retried
/// on the next call.
#[derive(Debug)]
pub struct RobotsGate {
    client: Client,
    cache: RwLock<HashMap<String, CachedRobots>>,
}

impl RobotsGate {
    /// Creates a gate that fetches robots.txt with `client`
    pub fn new(client: Client) -> Self {
        Self {
            client,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Checks whether `user_agent` may fetch `url`
    ///
    /// Returns `true` when the robots.txt cannot be retrieved or the URL
    /// cannot be interpreted, logging a warning.
    pub async fn can_fetch(&self, url: &str, user_agent: &str) -> bool {
        match self.policy_for(url).await {
            Ok(cached) => cached.is_allowed(url, user_agent),
            Err(e) => {
                tracing::warn!("Error reading robots.txt for {}: {}", url, e);
                true
            }
        }
    }

    /// Returns the number of cached policies
    pub async fn cached_policies(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn policy_for(&self, url: &str) -> Result<CachedRobots, SumiError> {
        let parsed = Url::parse(url)?;
        let robots_url = robots_url(&parsed)
            .ok_or_else(|| SumiError::Robots(format!("No host in {}", url)))?;
        let key = robots_url.to_string();

        if let Some(cached) = self.cache.read().await.get(&key) {
            if !cached.is_stale() {
                tracing::debug!("Using cached robots.txt: {}", key);
                return Ok(cached.clone());
            }
        }

        tracing::debug!("Fetching robots.txt: {}", key);
        let cached = CachedRobots::new(fetch_robots(&self.client, &robots_url).await?);

        self.cache.write().await.insert(key, cached.clone());

        Ok(cached)
    }
}
