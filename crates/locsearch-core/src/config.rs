// crates/locsearch-core/src/config.rs
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8004";
pub const AUTOCOMPLETE_PATH: &str = "/api/locations/autocomplete";

/// Tuning of one search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Shorter input never reaches the network.
    pub min_query_chars: usize,
    /// Quiet period after the last keystroke before a lookup is issued.
    #[serde(with = "millis")]
    pub debounce: Duration,
    /// Result cap sent to the endpoint.
    pub limit: usize,
    /// Cancel the task of a superseded lookup. Turning this off does not
    /// change which results get applied, only how much work is wasted.
    pub abort_superseded: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_query_chars: 2,
            debounce: Duration::from_millis(150),
            limit: 8,
            abort_superseded: true,
        }
    }
}

impl SearchConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_abort_superseded(mut self, abort: bool) -> Self {
        self.abort_superseded = abort;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_query_chars == 0 {
            return Err(Error::InvalidConfig(
                "min_query_chars must be at least 1".into(),
            ));
        }
        if self.limit == 0 {
            return Err(Error::InvalidConfig("limit must be at least 1".into()));
        }
        Ok(())
    }
}

/// Connection settings for [`crate::lookup::HttpLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(with = "millis")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full autocomplete URL, without the query string.
    pub fn autocomplete_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), AUTOCOMPLETE_PATH)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_search_surface() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.min_query_chars, 2);
        assert_eq!(cfg.debounce, Duration::from_millis(150));
        assert_eq!(cfg.limit, 8);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = SearchConfig::default().with_limit(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"debounce": 300}"#).unwrap();
        assert_eq!(cfg.debounce, Duration::from_millis(300));
        assert_eq!(cfg.limit, 8);
    }

    #[test]
    fn autocomplete_url_tolerates_trailing_slash() {
        assert_eq!(
            ClientConfig::new("https://api.example.org/").autocomplete_url(),
            "https://api.example.org/api/locations/autocomplete"
        );
    }
}
