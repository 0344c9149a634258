use crate::url::origin_of;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

/// Tracks the request timing of a single origin
#[derive(Debug, Clone, Default)]
pub struct OriginState {
    /// Start time of the most recent request to this origin
    pub last_request_time: Option<Instant>,

    /// Number of requests issued to this origin
    pub request_count: u32,
}

impl OriginState {
    /// Creates a new OriginState with no recorded requests
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, min_interval: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < min_interval {
            Some(min_interval - elapsed)
        } else {
            None
        }
    }

    /// Records that a request was started at `now`
    ///
    /// Timestamps only move forward.
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(match self.last_request_time {
            Some(last) if last > now => last,
            _ => now,
        });
    }
}

/// Enforces a minimum interval between request starts per origin
///
/// One instance is shared (behind an `Arc`) by every in-flight fetch of a
/// scraper. Each origin has its own async lock which is held across the
/// wait, so concurrent callers for the same origin queue up behind each
/// other while different origins proceed independently.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    origins: Mutex<HashMap<String, Arc<Mutex<OriginState>>>>,
}

impl RateLimiter {
    /// Creates a rate limiter with the given per-origin interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            origins: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the configured minimum interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until a request to `url`'s origin may start, then records it
    ///
    /// If the previous request to the same origin started less than the
    /// minimum interval ago, this sleeps for exactly the remaining deficit.
    /// URLs without a host are not rate limited.
    pub async fn await_turn(&self, url: &Url) {
        let Some(origin) = origin_of(url) else {
            return;
        };

        let slot = self.slot(&origin).await;
        let mut state = slot.lock().await;

        if let Some(wait) = state.time_until_next_request(self.min_interval, Instant::now()) {
            tracing::debug!("Rate limiting {}: waiting {:?}", origin, wait);
            tokio::time::sleep(wait).await;
        }

        state.record_request(Instant::now());
    }

    /// Returns the state recorded for `url`'s origin, if any
    pub async fn origin_state(&self, url: &Url) -> Option<OriginState> {
        let origin = origin_of(url)?;
        let slot = self.origins.lock().await.get(&origin).cloned()?;
        let state = slot.lock().await;
        Some(state.clone())
    }

    /// Returns the number of origins seen so far
    pub async fn tracked_origins(&self) -> usize {
        self.origins.lock().await.len()
    }

    async fn slot(&self, origin: &str) -> Arc<Mutex<OriginState>> {
        let mut origins = self.origins.lock().await;
        origins
            .entry(origin.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(OriginState::new())))
            .clone()
    }
}
