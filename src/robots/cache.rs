//! Robots.txt policy cache entries
//!
//! A policy is trusted for a day after it was fetched. Sites change their
//! robots.txt rarely, and re-reading it once per day keeps long-running
//! scrapers current without a request per page.

use crate::robots::ParsedRobots;
use chrono::{DateTime, Duration, Utc};

/// How long a fetched policy stays fresh, in hours
pub const POLICY_TTL_HOURS: i64 = 24;

/// A site's policy together with the time it was fetched
#[derive(Debug, Clone)]
pub struct CachedRobots {
    pub content: ParsedRobots,
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Wraps `content`, stamped now
    pub fn new(content: ParsedRobots) -> Self {
        Self {
            content,
            fetched_at: Utc::now(),
        }
    }

    /// Whether the policy is older than [`POLICY_TTL_HOURS`]
    pub fn is_stale(&self) -> bool {
        self.age() > Duration::hours(POLICY_TTL_HOURS)
    }

    /// Time elapsed since the fetch
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.fetched_at)
    }

    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        self.content.is_allowed(url, user_agent)
    }
}
