// crates/locsearch-core/src/lookup/http.rs
use super::Lookup;
use crate::config::ClientConfig;
use crate::error::{Error, LookupError, Result};
use crate::model::Suggestion;
use async_trait::async_trait;

/// Client for `GET {base_url}/api/locations/autocomplete?q=..&limit=..`.
///
/// The request timeout from [`ClientConfig`] bounds every call.
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: reqwest::Client,
    url: String,
}

impl HttpLookup {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(HttpLookup {
            client,
            url: config.autocomplete_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Lookup for HttpLookup {
    async fn lookup(&self, q: &str, limit: usize) -> std::result::Result<Vec<Suggestion>, LookupError> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.url)
            .query(&[("q", q), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        Ok(response.json::<Vec<Suggestion>>().await?)
    }
}
