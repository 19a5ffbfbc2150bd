//! Pagination module
//!
//! Fetches every page of a page-numbered collection with one round of
//! concurrent requests after the first page.
//!
//! # Overview
//!
//! - [`PageSource`] fetches one page; [`HttpPageSource`] does it over HTTP
//! - [`PagedFetcher`] drives a source: page 1 first, then pages 2..=N at once
//! - [`DiagnosticSink`] receives page failures instead of the caller

mod diagnostics;
mod fetcher;
mod source;
mod types;

pub use diagnostics::{DiagnosticSink, FetchEvent, MemorySink, TracingSink};
pub use fetcher::{FetcherConfig, PagedFetcher, DEFAULT_MAX_PAGES, DEFAULT_PER_PAGE};
pub use source::{HttpPageSource, PageSource, DEFAULT_PAGE_PARAM, DEFAULT_PER_PAGE_PARAM};
pub use types::{
    Aggregate, ApiEnvelope, FetchError, FetchStats, Page, PageMeta, UNKNOWN_API_ERROR,
};
