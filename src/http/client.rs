//! HTTP transport
//!
//! Every request is a single GET attempt. Statuses outside 2xx come back as
//! [`Error::HttpStatus`] with the body attached; nothing is retried at this
//! layer or above it.

use super::throttle::{Throttle, ThrottleConfig};
use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Prefix for request paths that are not absolute URLs
    pub base_url: Option<String>,
    /// Per-request timeout; `None` lets a request wait indefinitely
    pub timeout: Option<Duration>,
    /// Request pacing, off when `None`
    pub throttle: Option<ThrottleConfig>,
    /// Headers sent with every request
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = StringMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            base_url: None,
            timeout: None,
            throttle: None,
            default_headers,
            user_agent: format!("bulvds-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for [`HttpClientConfig`]
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Bound each request
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Pace requests through a shared token bucket
    #[must_use]
    pub fn throttle(mut self, config: ThrottleConfig) -> Self {
        self.config.throttle = Some(config);
        self
    }

    /// Add a default header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query and headers for one request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
    /// Extra headers, applied after the defaults
    pub headers: StringMap,
}

impl RequestConfig {
    /// Create an empty request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Look up a query parameter by name
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// JSON-over-HTTP client shared by the listings source and content loader
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    throttle: Option<Throttle>,
}

impl HttpClient {
    /// Create a client with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let throttle = config.throttle.as_ref().map(Throttle::new);

        Ok(Self {
            client,
            config,
            throttle,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if requests are paced
    pub fn is_throttled(&self) -> bool {
        self.throttle.is_some()
    }

    /// Send one GET request
    pub async fn get(&self, url: &str, request: &RequestConfig) -> Result<Response> {
        let url = self.resolve(url);

        if let Some(throttle) = &self.throttle {
            throttle.acquire().await;
        }

        let mut req = self.client.get(&url).query(&request.query);
        for (key, value) in self.config.default_headers.iter().chain(&request.headers) {
            req = req.header(key.as_str(), value.as_str());
        }

        debug!(%url, query = ?request.query, "GET");
        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%url, status = status.as_u16(), "non-success status");
            return Err(Error::http_status(status.as_u16(), body));
        }

        Ok(response)
    }

    /// GET a URL and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url, &RequestConfig::default()).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::decode(format!("{url}: {e}")))
    }

    /// Join a path onto the base URL unless it is already absolute
    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("throttled", &self.throttle.is_some())
            .finish_non_exhaustive()
    }
}
