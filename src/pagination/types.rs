//! Pagination types
//!
//! Defines the page, envelope, error and aggregate types shared by page
//! sources and the fetcher.

use crate::error::Error;
use crate::types::{JsonValue, OptionStringExt};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use thiserror::Error as ThisError;

/// Message used when the API reports failure without saying why
pub const UNKNOWN_API_ERROR: &str = "Unknown error from API";

/// One fetched page of items
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// 1-based page number
    pub number: u32,
    /// Items in server order
    pub items: Vec<T>,
    /// Total page count reported by the server, if any
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(number: u32, items: Vec<T>, total_pages: Option<u32>) -> Self {
        Self {
            number,
            items,
            total_pages,
        }
    }

    /// Page count to fan out to; missing or zero counts as a single page
    pub fn effective_total(&self) -> u32 {
        self.total_pages.unwrap_or(1).max(1)
    }
}

/// Pagination metadata in the response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    /// Total number of pages; anything that is not a count of at least one
    /// reads as absent
    #[serde(rename = "pageCount", default, deserialize_with = "lenient_page_count")]
    pub page_count: Option<u32>,
}

fn lenient_page_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(page_count_from_value))
}

/// Numbers and numeric strings count, truncated toward zero. Booleans,
/// empty strings, objects and values below one do not.
fn page_count_from_value(value: &JsonValue) -> Option<u32> {
    let count = match value {
        JsonValue::Number(n) => n.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (count >= 1.0).then(|| count.min(f64::from(u32::MAX)) as u32)
}

/// Response body returned by the listings API
///
/// ```json
/// { "status": true, "message": "", "data": [ ... ], "meta": { "pageCount": 3 } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Success flag
    #[serde(default)]
    pub status: bool,
    /// Failure message
    #[serde(default)]
    pub message: Option<String>,
    /// Items on this page
    pub data: Option<Vec<T>>,
    /// Pagination metadata
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T> ApiEnvelope<T> {
    /// Convert the envelope into a page, failing if the success flag is false
    pub fn into_page(self, number: u32) -> Result<Page<T>, FetchError> {
        if !self.status {
            return Err(FetchError::Application {
                message: self
                    .message
                    .none_if_empty()
                    .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string()),
            });
        }

        let total_pages = self.meta.and_then(|m| m.page_count);

        Ok(Page::new(number, self.data.unwrap_or_default(), total_pages))
    }
}

/// Why a single page could not be fetched
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with a status outside 2xx
    #[error("HTTP status {status}")]
    Transport { status: u16 },

    /// Request failed before a status was received
    #[error("network error: {message}")]
    Network { message: String },

    /// Server answered `status: false`
    #[error("API error: {message}")]
    Application { message: String },

    /// Body was not the expected JSON structure
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Page did not settle before the fetch deadline
    #[error("deadline exceeded after {after_ms}ms")]
    DeadlineExceeded { after_ms: u64 },
}

impl FetchError {
    /// Short, stable name for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Network { .. } => "network",
            Self::Application { .. } => "application",
            Self::Decode { .. } => "decode",
            Self::DeadlineExceeded { .. } => "deadline",
        }
    }

    /// Check if this is a deadline error
    pub fn is_deadline(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }
}

impl From<Error> for FetchError {
    fn from(err: Error) -> Self {
        match err {
            Error::HttpStatus { status, .. } => Self::Transport { status },
            Error::Fetch(inner) => inner,
            Error::Decode { message } => Self::Decode { message },
            Error::JsonParse(e) => Self::Decode {
                message: e.to_string(),
            },
            Error::Http(e) if e.is_decode() => Self::Decode {
                message: e.to_string(),
            },
            other => Self::Network {
                message: other.to_string(),
            },
        }
    }
}

/// Counters for one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Page count reported by page 1 (1 when absent)
    pub pages_reported: u32,
    /// Pages the run asked for (including page 1)
    pub pages_requested: u32,
    /// Pages that came back successfully
    pub pages_fetched: u32,
    /// Items in the merged result
    pub items: usize,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

/// Outcome of a multi-page fetch whose first page succeeded
#[derive(Debug, Clone)]
pub struct Aggregate<T> {
    /// Items in ascending page order
    pub items: Vec<T>,
    /// Pages after the first that contributed nothing, with the reason
    pub failed_pages: BTreeMap<u32, FetchError>,
    /// Pages past the page cap that were never requested
    pub skipped_pages: Option<RangeInclusive<u32>>,
    /// True if the deadline cut the fan-out short
    pub timed_out: bool,
    /// Run counters
    pub stats: FetchStats,
}

impl<T> Aggregate<T> {
    /// True if every reported page contributed its items
    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty() && self.skipped_pages.is_none()
    }

    /// Failed page numbers in ascending order
    pub fn failed_page_numbers(&self) -> Vec<u32> {
        self.failed_pages.keys().copied().collect()
    }

    /// Drop the report and keep the items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
