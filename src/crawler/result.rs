use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Title used when a page has none
pub const NO_TITLE: &str = "No Title";

/// Description used when a page has no `<meta name="description">`
pub const NO_DESCRIPTION: &str = "No Description";

/// Keywords used when a page has no `<meta name="keywords">`
pub const NO_KEYWORDS: &str = "No Keywords";

/// Body text used when no paragraph text was found
pub const NO_CONTENT: &str = "No main content found.";

/// Content of the sentinel returned for URLs robots.txt forbids
pub const ROBOTS_DENIED: &str = "Access denied by robots.txt";

/// Content extracted from one page
///
/// Failures are carried through the same record: see [`FetchResult::denied`]
/// and [`FetchResult::failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    /// Text of the `<title>` element
    pub title: String,

    /// `content` of `<meta name="description">`
    pub description: String,

    /// `content` of `<meta name="keywords">`
    pub keywords: String,

    /// Paragraph text from the main content area, at most 2400 characters
    pub content: String,

    /// Distinct resolved links, at most 10
    pub links: BTreeSet<String>,
}

impl FetchResult {
    /// Sentinel for a URL that robots.txt forbids
    pub fn denied() -> Self {
        Self::sentinel(ROBOTS_DENIED.to_string())
    }

    /// Sentinel for a URL that could not be fetched
    pub fn failed(url: &str) -> Self {
        Self::sentinel(format!("Failed to fetch {}", url))
    }

    /// Returns true if this is the robots.txt denial sentinel
    pub fn is_denied(&self) -> bool {
        self.content == ROBOTS_DENIED && self.links.is_empty()
    }

    /// Returns true if this is a fetch failure sentinel
    pub fn is_failure(&self) -> bool {
        self.content.starts_with("Failed to fetch ") && self.links.is_empty()
    }

    fn sentinel(content: String) -> Self {
        Self {
            title: NO_TITLE.to_string(),
            description: NO_DESCRIPTION.to_string(),
            keywords: NO_KEYWORDS.to_string(),
            content,
            links: BTreeSet::new(),
        }
    }
}
