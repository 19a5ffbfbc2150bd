//! Content document loader

use super::types::{Faq, Footer, Testimonial};
use crate::error::{Result, ResultExt};
use crate::http::HttpClient;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Path of the testimonials document
pub const TESTIMONIALS_PATH: &str = "/data/client.json";

/// Path of the FAQ document
pub const FAQ_PATH: &str = "/data/faq.json";

/// Path of the footer document
pub const FOOTER_PATH: &str = "/data/footer.json";

/// Loads the site's static content documents
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: HttpClient,
    site_url: String,
}

impl ContentClient {
    /// Create a loader for documents served under `site_url`
    pub fn new(client: HttpClient, site_url: impl Into<String>) -> Self {
        Self {
            client,
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Site base URL
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Load client testimonials
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        self.document(TESTIMONIALS_PATH).await
    }

    /// Load the FAQ list
    pub async fn faqs(&self) -> Result<Vec<Faq>> {
        self.document(FAQ_PATH).await
    }

    /// Load the footer
    pub async fn footer(&self) -> Result<Footer> {
        self.document(FOOTER_PATH).await
    }

    async fn document<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.site_url);
        debug!("Loading content document {url}");
        self.client
            .get_json(&url)
            .await
            .with_context(|| format!("Failed to load {path}"))
    }
}
