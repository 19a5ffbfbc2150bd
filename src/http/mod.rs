//! HTTP client module
//!
//! A thin reqwest wrapper for the listings API and the site's JSON
//! documents: one attempt per request, non-2xx mapped to an error, and
//! optional pacing through a governor token bucket.

mod client;
mod throttle;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use throttle::{Throttle, ThrottleConfig};
