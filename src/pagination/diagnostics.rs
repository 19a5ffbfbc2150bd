//! Diagnostic sinks for page fetches
//!
//! The fetcher never raises page failures to its caller. Instead it reports
//! them as [`FetchEvent`]s to an injected [`DiagnosticSink`].

use super::types::FetchError;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Something worth recording during a fetch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// A page came back successfully
    PageFetched {
        /// Page number
        page: u32,
        /// Items on the page
        items: usize,
    },
    /// A page failed
    PageFailed {
        /// Page number
        page: u32,
        /// Cause
        error: FetchError,
    },
    /// The server reported more pages than the fetcher will request
    PagesCapped {
        /// Page count from page 1
        reported: u32,
        /// Highest page that will be requested
        cap: u32,
    },
    /// The deadline expired with these pages still in flight
    DeadlineExpired {
        /// Unfinished page numbers, ascending
        pages: Vec<u32>,
        /// Deadline in milliseconds
        after_ms: u64,
    },
    /// A run finished with at least the first page
    Completed {
        /// Pages requested
        pages_requested: u32,
        /// Pages that failed
        pages_failed: u32,
        /// Items merged
        items: usize,
    },
}

/// Receives fetch events
pub trait DiagnosticSink: Send + Sync {
    /// Record one event
    fn record(&self, event: &FetchEvent);
}

/// Sink that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &FetchEvent) {
        match event {
            FetchEvent::PageFetched { page, items } => {
                debug!(page, items, "Fetched listings page");
            }
            FetchEvent::PageFailed { page, error } => {
                warn!(page, kind = error.kind(), "Failed to fetch listings page {page}: {error}");
            }
            FetchEvent::PagesCapped { reported, cap } => {
                warn!(reported, cap, "Server reported {reported} pages, requesting only {cap}");
            }
            FetchEvent::DeadlineExpired { pages, after_ms } => {
                warn!(after_ms, "Deadline expired with pages {pages:?} still pending");
            }
            FetchEvent::Completed {
                pages_requested,
                pages_failed,
                items,
            } => {
                info!(
                    pages_requested,
                    pages_failed, items, "Finished fetching listings"
                );
            }
        }
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<FetchEvent>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<FetchEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Failed page numbers in the order they were recorded
    pub fn failed_pages(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                FetchEvent::PageFailed { page, .. } => Some(page),
                _ => None,
            })
            .collect()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, event: &FetchEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
