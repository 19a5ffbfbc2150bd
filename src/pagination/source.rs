//! Page sources
//!
//! A [`PageSource`] fetches exactly one page. [`HttpPageSource`] is the
//! implementation that talks to the listings API.

use super::types::{ApiEnvelope, FetchError, Page};
use crate::http::{HttpClient, RequestConfig};
use crate::types::Listing;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Default page query parameter name
pub const DEFAULT_PAGE_PARAM: &str = "page";

/// Default page size query parameter name
pub const DEFAULT_PER_PAGE_PARAM: &str = "perPage";

/// Fetches a single page of a paginated collection
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type on each page
    type Item: Send;

    /// Fetch one page. Inputs are not validated.
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page<Self::Item>, FetchError>;
}

/// Page source backed by a JSON HTTP endpoint
pub struct HttpPageSource<T = Listing> {
    client: HttpClient,
    url: String,
    page_param: String,
    per_page_param: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpPageSource<T> {
    /// Create a source for the given endpoint (absolute, or relative to
    /// the client's base URL)
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            per_page_param: DEFAULT_PER_PAGE_PARAM.to_string(),
            _item: PhantomData,
        }
    }

    /// Override the query parameter names
    #[must_use]
    pub fn with_params(mut self, page: impl Into<String>, per_page: impl Into<String>) -> Self {
        self.page_param = page.into();
        self.per_page_param = per_page.into();
        self
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<T> PageSource for HttpPageSource<T>
where
    T: DeserializeOwned + Send,
{
    type Item = T;

    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page<T>, FetchError> {
        let request = RequestConfig::new()
            .query(&self.page_param, page)
            .query(&self.per_page_param, per_page);

        let response = self.client.get(&self.url, &request).await?;
        let body = response.text().await.map_err(|e| FetchError::Network {
            message: format!("failed to read body: {e}"),
        })?;

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode {
                message: e.to_string(),
            })?;
        envelope.into_page(page)
    }
}

impl<T> std::fmt::Debug for HttpPageSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageSource")
            .field("url", &self.url)
            .field("page_param", &self.page_param)
            .field("per_page_param", &self.per_page_param)
            .finish_non_exhaustive()
    }
}
