//! Request throttling
//!
//! The listings fan-out puts every remaining page on the wire at once. A
//! [`Throttle`] meters those requests through one governor token bucket
//! shared by every clone of the owning [`HttpClient`](super::HttpClient).
//! Requests still overlap; the bucket only paces how fast they start.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;

type Bucket = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Request pacing settings
///
/// ```yaml
/// throttle:
///   requests_per_second: 20
///   burst: 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Sustained request rate
    pub requests_per_second: u32,
    /// Requests allowed back to back before pacing starts
    #[serde(default = "default_burst")]
    pub burst: u32,
}

fn default_burst() -> u32 {
    10
}

impl ThrottleConfig {
    /// Create a throttle config
    pub fn new(requests_per_second: u32, burst: u32) -> Self {
        Self {
            requests_per_second,
            burst,
        }
    }
}

/// Shared token bucket
#[derive(Clone)]
pub struct Throttle {
    bucket: Arc<Bucket>,
}

impl Throttle {
    /// Build a throttle; zero rates and bursts are raised to one
    pub fn new(config: &ThrottleConfig) -> Self {
        let rate = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);

        Self {
            bucket: Arc::new(RateLimiter::direct(
                Quota::per_second(rate).allow_burst(burst),
            )),
        }
    }

    /// Wait for a request slot
    pub async fn acquire(&self) {
        self.bucket.until_ready().await;
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle").finish_non_exhaustive()
    }
}
