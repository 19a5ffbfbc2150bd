//! Paginated fetch aggregator
//!
//! [`PagedFetcher`] fetches page 1, reads the total page count from it, then
//! requests every remaining page at once and merges the results in page
//! order.
//!
//! ```text
//! fetch page 1 ──┬── failed ──────────────────────────► Err(FetchError)
//!                └── ok, pageCount = N
//!                      │
//!                      ├── N <= 1 ────────────────────► Ok(page 1 items)
//!                      └── pages 2..=N in flight together
//!                            │   (each lands in slot page - 2)
//!                            └── merge slots in order ─► Ok(items)
//! ```
//!
//! A server-reported count above [`FetcherConfig::max_pages`] is cut to the
//! cap and the rest is reported as skipped.
//!
//! Later-page failures never fail the run. [`PagedFetcher::fetch_all_report`]
//! says which pages were lost; [`PagedFetcher::fetch_all`] only returns the
//! items.

use super::diagnostics::{DiagnosticSink, FetchEvent, TracingSink};
use super::source::PageSource;
use super::types::{Aggregate, FetchError, FetchStats, Page};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Page size used when the caller has no preference
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Highest page number requested when the caller sets no cap
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Configuration for a fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Upper bound on a whole run; `None` waits for every page
    pub deadline: Option<Duration>,
    /// Pages past this number are reported as skipped, never requested
    pub max_pages: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            deadline: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl FetcherConfig {
    /// Create a config with no deadline and the default page cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page cap; zero is treated as one
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the run deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Fetches every page of a collection
pub struct PagedFetcher<S> {
    source: S,
    config: FetcherConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl<S: PageSource> PagedFetcher<S> {
    /// Create a fetcher that logs through `tracing`
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: FetcherConfig::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Set the fetcher configuration
    #[must_use]
    pub fn with_config(mut self, config: FetcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the diagnostic sink
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Get the page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the configuration
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch one page, recording the outcome
    pub async fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Page<S::Item>, FetchError> {
        let result = self.source.fetch_page(page, per_page).await;
        match &result {
            Ok(fetched) => self.sink.record(&FetchEvent::PageFetched {
                page,
                items: fetched.items.len(),
            }),
            Err(error) => self.sink.record(&FetchEvent::PageFailed {
                page,
                error: error.clone(),
            }),
        }
        result
    }

    /// Fetch every page and return the items in page order
    ///
    /// Fails only if page 1 fails. Items from later pages that failed are
    /// missing from the result.
    pub async fn fetch_all(&self, per_page: u32) -> Result<Vec<S::Item>, FetchError> {
        self.fetch_all_report(per_page)
            .await
            .map(Aggregate::into_items)
    }

    /// Fetch every page and report which pages were lost
    pub async fn fetch_all_report(
        &self,
        per_page: u32,
    ) -> Result<Aggregate<S::Item>, FetchError> {
        let started = Instant::now();
        let deadline = self.config.deadline.map(|d| started + d);
        let after_ms = self.config.deadline.map_or(0, |d| d.as_millis() as u64);

        let first = match deadline {
            Some(at) => match tokio::time::timeout_at(at, self.fetch_page(1, per_page)).await {
                Ok(result) => result,
                Err(_) => {
                    let error = FetchError::DeadlineExceeded { after_ms };
                    self.sink.record(&FetchEvent::PageFailed {
                        page: 1,
                        error: error.clone(),
                    });
                    Err(error)
                }
            },
            None => self.fetch_page(1, per_page).await,
        }?;

        let reported = first.effective_total();
        let total = reported.min(self.config.max_pages.max(1));
        let skipped_pages = (reported > total).then(|| {
            self.sink.record(&FetchEvent::PagesCapped {
                reported,
                cap: total,
            });
            total + 1..=reported
        });
        let mut slots: Vec<Option<Result<Page<S::Item>, FetchError>>> =
            (2..=total).map(|_| None).collect();
        let mut timed_out = false;

        if total > 1 {
            let mut pending: FuturesUnordered<_> = (2..=total)
                .map(move |page| async move { (page, self.fetch_page(page, per_page).await) })
                .collect();

            loop {
                let next = match deadline {
                    Some(at) => {
                        if let Ok(next) = tokio::time::timeout_at(at, pending.next()).await {
                            next
                        } else {
                            timed_out = true;
                            break;
                        }
                    }
                    None => pending.next().await,
                };

                let Some((page, result)) = next else { break };
                slots[(page - 2) as usize] = Some(result);
            }
        }

        let mut items = first.items;
        let mut failed_pages = BTreeMap::new();
        let mut unfinished = Vec::new();

        for (offset, slot) in slots.into_iter().enumerate() {
            let page = offset as u32 + 2;
            match slot {
                Some(Ok(fetched)) => items.extend(fetched.items),
                Some(Err(error)) => {
                    failed_pages.insert(page, error);
                }
                None => {
                    unfinished.push(page);
                    failed_pages.insert(page, FetchError::DeadlineExceeded { after_ms });
                }
            }
        }

        if !unfinished.is_empty() {
            self.sink.record(&FetchEvent::DeadlineExpired {
                pages: unfinished,
                after_ms,
            });
        }

        let pages_failed = failed_pages.len() as u32;
        self.sink.record(&FetchEvent::Completed {
            pages_requested: total,
            pages_failed,
            items: items.len(),
        });

        let stats = FetchStats {
            pages_reported: reported,
            pages_requested: total,
            pages_fetched: total - pages_failed,
            items: items.len(),
            duration_ms: started.elapsed().as_millis() as u64,
        };

        Ok(Aggregate {
            items,
            failed_pages,
            skipped_pages,
            timed_out,
            stats,
        })
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for PagedFetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedFetcher")
            .field("source", &self.source)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
