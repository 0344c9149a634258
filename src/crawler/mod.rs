//! Crawler module for page fetching and content extraction
//!
//! This module contains the core scraping pipeline, including:
//! - HTTP fetching with rate limiting, retry and backoff
//! - Optional headless-browser rendering
//! - HTML content extraction and summarization
//! - Per-URL and batch coordination

mod coordinator;
mod fetcher;
mod parser;
mod render;
mod result;
mod summary;

pub use coordinator::{scrape, Scraper};
pub use fetcher::{backoff_delay, build_http_client, Fetcher};
pub use parser::{truncate_chars, ContentExtractor, MAX_CONTENT_CHARS, MAX_LINKS};
#[cfg(feature = "render")]
pub use render::ChromiumRenderer;
pub use render::{renderer_from_config, NullRenderer, Renderer};
pub use result::{FetchResult, NO_CONTENT, NO_DESCRIPTION, NO_KEYWORDS, NO_TITLE, ROBOTS_DENIED};
pub use summary::summarize;
