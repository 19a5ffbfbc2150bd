//! # bulvds-feed
//!
//! Data layer for the Bulvds listing site: paginated property listings and
//! the static site content documents.
//!
//! ## Features
//!
//! - **Paginated Listings**: Page 1 first, then every remaining page at once
//! - **Partial Success**: Lost pages are reported, never fatal after page 1
//! - **Deadlines**: Optional bound on a whole run
//! - **Site Content**: Testimonials, FAQ and footer documents
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bulvds_feed::http::HttpClient;
//! use bulvds_feed::pagination::{HttpPageSource, PagedFetcher};
//!
//! #[tokio::main]
//! async fn main() -> bulvds_feed::Result<()> {
//!     let client = HttpClient::new()?;
//!     let source = HttpPageSource::<serde_json::Value>::new(
//!         client,
//!         "https://api.bulvds.com/guest/property",
//!     );
//!     let listings = PagedFetcher::new(source).fetch_all(15).await?;
//!     println!("{} listings", listings.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                          CLI                              │
//! │  listings   page   content   config   stamp               │
//! └───────────────────────────────────────────────────────────┘
//!                │                         │
//! ┌──────────────┴─────────────┐  ┌────────┴─────────┐
//! │        Pagination          │  │     Content      │
//! │ PagedFetcher → PageSource  │  │  ContentClient   │
//! │ DiagnosticSink             │  │  stamps          │
//! └──────────────┬─────────────┘  └────────┬─────────┘
//!                └────────────┬────────────┘
//!                     ┌───────┴───────┐
//!                     │     HTTP      │
//!                     │   throttle    │
//!                     └───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with optional request pacing
pub mod http;

/// Paginated fetch aggregation
pub mod pagination;

/// Site content documents
pub mod content;

/// Feed configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::FeedConfig;
pub use error::{Error, Result};
pub use pagination::{Aggregate, FetchError, PagedFetcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
