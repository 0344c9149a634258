//! Sumi-Scrape: a polite page fetcher and content extractor
//!
//! This crate fetches web pages while respecting robots.txt and per-origin
//! rate limits, then extracts title, metadata, body text and links
//! from the returned markup.

pub mod config;
pub mod crawler;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Scrape operations
///
/// Nothing in here escapes a single URL's pipeline: the public scrape
/// operations fold every variant into a sentinel [`FetchResult`].
#[derive(Debug, Error)]
pub enum SumiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL disallowed by robots.txt: {url}")]
    RobotsDenied { url: String },

    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },

    #[error("Robots.txt error: {0}")]
    Robots(String),
}

impl SumiError {
    /// Classifies a reqwest failure for the given URL
    pub(crate) fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            SumiError::Timeout {
                url: url.to_string(),
            }
        } else {
            SumiError::Http {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Sumi-Scrape operations
pub type Result<T> = std::result::Result<T, SumiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{summarize, ContentExtractor, FetchResult, Fetcher, Scraper};
pub use robots::RobotsGate;
pub use state::RateLimiter;
pub use crate::url::origin_of;
