//! State module for per-origin politeness tracking
//!
//! # Components
//!
//! - `RateLimiter`: Serializes request starts per origin with a minimum interval
//! - `OriginState`: The timing data recorded for one origin

mod rate_limiter;

// Re-export main types
pub use rate_limiter::{OriginState, RateLimiter};
