//! URL handling module for Sumi-Scrape
//!
//! This module derives the keys the politeness layer works with: the origin
//! used for rate limiting and the location of a site's robots.txt.

mod origin;

// Re-export main functions
pub use origin::{origin_of, robots_url};
