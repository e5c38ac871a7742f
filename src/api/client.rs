//! Remote search client implementation.
//!
//! Fetches tag suggestions from a configured HTTP endpoint. The endpoint
//! contract is deliberately narrow: one URL, GET or POST, and a JSON array
//! of tag seeds back. Authentication, retries and backoff are the
//! endpoint's concern, not the widget's; a failed search simply never
//! reaches the completion path.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{CallMethod, SearchParams};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The remote search client.
#[derive(Debug, Clone)]
pub struct SearchClient {
    /// The HTTP client.
    client: Client,
    /// The search endpoint URL.
    call_url: String,
    /// Method used for search calls.
    method: CallMethod,
}

impl SearchClient {
    /// Create a new search client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or has no HTTP scheme, or if
    /// the HTTP client cannot be built.
    pub fn new(call_url: &str, method: CallMethod) -> Result<Self> {
        let call_url = normalize_call_url(call_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("taginput/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            call_url,
            method,
        })
    }

    /// The normalized endpoint URL.
    pub fn call_url(&self) -> &str {
        &self.call_url
    }

    /// Fetch tag seeds for the given parameters.
    ///
    /// GET sends the parameters as a query string, POST as a form body.
    /// The response body must be a JSON array; its elements are returned
    /// verbatim as seed values.
    #[instrument(skip(self), fields(term = %params.term()))]
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Value>> {
        let pairs = params.pairs();
        let request = match self.method {
            CallMethod::Get => self.client.get(&self.call_url).query(&pairs),
            CallMethod::Post => self.client.post(&self.call_url).form(&pairs),
        };

        debug!(url = %self.call_url, method = ?self.method, "issuing search");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "search request failed");
            return Err(ApiError::from_status(status, "tag search"));
        }

        let body: Value = response.json().await?;
        let seeds = seeds_from_value(body)?;
        debug!(count = seeds.len(), "search returned seeds");
        Ok(seeds)
    }
}

/// Validate and normalize the endpoint URL.
fn normalize_call_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(ApiError::InvalidUrl("search URL is empty".to_string()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::InvalidUrl(format!(
            "search URL must start with http:// or https://, got '{}'",
            url
        )));
    }
    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!("search URL does not use HTTPS: {}", url);
    }
    Ok(url.to_string())
}

/// Interpret a response body as an array of tag seeds.
fn seeds_from_value(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(seeds) => Ok(seeds),
        other => Err(ApiError::InvalidResponse(format!(
            "expected a JSON array of tag seeds, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Human-readable JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rejects_empty_url() {
        let err = SearchClient::new("", CallMethod::Post).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_new_rejects_scheme_less_url() {
        let err = SearchClient::new("example.com/tags", CallMethod::Get).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_new_normalizes_trailing_slash() {
        let client = SearchClient::new("https://example.com/tags/", CallMethod::Get).unwrap();
        assert_eq!(client.call_url(), "https://example.com/tags");
    }

    #[test]
    fn test_seeds_from_array() {
        let seeds = seeds_from_value(json!(["alpha", {"text": "beta"}])).unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0], json!("alpha"));
    }

    #[test]
    fn test_seeds_from_empty_array() {
        assert!(seeds_from_value(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_seeds_from_non_array_rejected() {
        let err = seeds_from_value(json!({"tags": []})).unwrap_err();
        match err {
            ApiError::InvalidResponse(msg) => assert!(msg.contains("an object")),
            _ => panic!("Expected InvalidResponse"),
        }
    }

    #[tokio::test]
    async fn test_search_network_failure_is_an_error() {
        // Nothing listens on this port; the request must fail without
        // panicking and surface as a network error.
        let client = SearchClient::new("http://localhost:1", CallMethod::Get).unwrap();
        let err = client.search(&SearchParams::new("rust")).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
