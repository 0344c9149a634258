//! Configuration module for Sumi-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sumi_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scrape.toml")).unwrap();
//! println!("Max retries: {}", config.scraper.max_retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, RenderConfig, ScraperConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
