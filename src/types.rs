//! Common types used throughout bulvds-feed

use std::collections::HashMap;

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Header and query maps with string keys and values
pub type StringMap = HashMap<String, String>;

/// An opaque listing record as returned by the listings API
pub type Listing = JsonValue;

/// Treat empty strings as absent
pub trait OptionStringExt {
    /// Returns None if the string is missing or empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_if_empty() {
        assert_eq!(Some("sold out".to_string()).none_if_empty().as_deref(), Some("sold out"));
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
    }
}
