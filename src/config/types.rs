use serde::Deserialize;
use std::time::Duration;

/// Desktop browser user agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Main configuration structure for Sumi-Scrape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Fetch and extraction behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// User agent header for page and robots.txt requests
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum time between request starts to the same origin (milliseconds)
    #[serde(rename = "min-request-interval-ms", default = "default_interval_ms")]
    pub min_request_interval_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of fetch attempts before giving up
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff unit; the delay before retry `n` is `unit * 2^n`
    #[serde(rename = "retry-backoff-ms", default = "default_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Reduce long body text to its leading sentences
    #[serde(default = "default_true")]
    pub summarize: bool,

    /// Number of URLs processed at once by a batch scrape
    #[serde(rename = "max-concurrent", default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

/// Script rendering configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Fetch pages through a headless browser instead of plain HTTP
    #[serde(default)]
    pub enabled: bool,

    /// DevTools websocket of an already running browser. When unset a
    /// local browser is launched per page.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ScraperConfig {
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            min_request_interval_ms: default_interval_ms(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_backoff_ms(),
            summarize: true,
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_max_concurrent() -> usize {
    4
}
