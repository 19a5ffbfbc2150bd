//! Feed configuration
//!
//! [`FeedConfig`] is loaded from a YAML or JSON file and turned into the
//! HTTP client and fetcher configurations.
//!
//! ```yaml
//! listings_url: "https://api.bulvds.com/guest/property"
//! site_url: "https://bulvds.com"
//! per_page: 15
//! deadline_ms: 10000
//! max_pages: 200
//! http:
//!   timeout_seconds: 30
//!   headers:
//!     X-Client: site
//!   throttle:
//!     requests_per_second: 20
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, ThrottleConfig};
use crate::pagination::{FetcherConfig, DEFAULT_MAX_PAGES, DEFAULT_PER_PAGE};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Listings endpoint used when the config does not name one
pub const DEFAULT_LISTINGS_URL: &str = "https://api.bulvds.com/guest/property";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete feed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Listings API endpoint
    #[serde(default = "default_listings_url")]
    pub listings_url: String,

    /// Base URL of the site serving `/data/*.json`
    #[serde(default)]
    pub site_url: Option<String>,

    /// Items per listings page
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Upper bound on a whole listings run, in milliseconds
    #[serde(default)]
    pub deadline_ms: Option<u64>,

    /// Highest listings page requested, whatever page 1 reports
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_listings_url() -> String {
    DEFAULT_LISTINGS_URL.to_string()
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            listings_url: default_listings_url(),
            site_url: None,
            per_page: default_per_page(),
            deadline_ms: None,
            max_pages: default_max_pages(),
            http: HttpConfig::default(),
        }
    }
}

impl FeedConfig {
    /// Load a config file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_yaml_str(&content)?,
        };
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.listings_url)
            .map_err(|e| Error::invalid_value("listings_url", e.to_string()))?;

        if let Some(site_url) = &self.site_url {
            Url::parse(site_url).map_err(|e| Error::invalid_value("site_url", e.to_string()))?;
        }

        if self.per_page == 0 {
            return Err(Error::invalid_value("per_page", "must be at least 1"));
        }

        if self.max_pages == 0 {
            return Err(Error::invalid_value("max_pages", "must be at least 1"));
        }

        Ok(())
    }

    /// Site URL, or an error naming the missing field
    pub fn require_site_url(&self) -> Result<&str> {
        self.site_url
            .as_deref()
            .ok_or_else(|| Error::missing_field("site_url"))
    }

    /// Run deadline, if configured
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Fetcher configuration
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            deadline: self.deadline(),
            max_pages: self.max_pages,
        }
    }

    /// HTTP client configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let http = &self.http;
        let mut builder = HttpClientConfig::builder();

        if let Some(timeout) = http.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = &http.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &http.headers {
            builder = builder.header(key, value);
        }
        if let Some(throttle) = &http.throttle {
            builder = builder.throttle(throttle.clone());
        }

        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds; absent or 0 means none
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,

    /// Request pacing, off when absent
    #[serde(default)]
    pub throttle: Option<ThrottleConfig>,
}

impl HttpConfig {
    /// Per-request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
