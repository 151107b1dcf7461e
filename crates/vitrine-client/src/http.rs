//! HTTP implementation of the fetch collaborator.
//!
//! ureq is synchronous, so calls run on the blocking pool behind the async
//! `Fetcher` boundary. The agent carries a global timeout; everything else
//! the core needs to know about a failure is folded into `FetchError`.

use crate::fetcher::Fetcher;
use futures::future::BoxFuture;
use std::time::Duration;
use vitrine_core::{AppConfig, FetchError, QueryResultSet, SearchField};

/// Default timeout for one query API call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Real collaborator against the catalog query API.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    api_base: String,
    api_key: String,
    page_size: u32,
    default_keyword: String,
}

impl HttpFetcher {
    /// Create a fetcher from application configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(config: &AppConfig, timeout: Duration) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();

        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
            default_keyword: config.default_keyword.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Blocking calls
    // -------------------------------------------------------------------------

    /// GET the object endpoint with one term/value filter.
    fn get_by_term(&self, term: &str, value: &str) -> Result<QueryResultSet, FetchError> {
        tracing::debug!(term, value, "query API search");
        let response = self
            .agent
            .get(&self.api_base)
            .query("apikey", &self.api_key)
            .query("size", self.page_size.to_string())
            .query(term, value)
            .call()
            .map_err(map_ureq_error)?;

        decode_response(response)
    }

    /// GET a page cursor URL exactly as the API handed it back.
    fn get_url(&self, url: &str) -> Result<QueryResultSet, FetchError> {
        tracing::debug!(url, "query API page fetch");
        let response = self.agent.get(url).call().map_err(map_ureq_error)?;
        decode_response(response)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_initial(&self) -> BoxFuture<'static, Result<QueryResultSet, FetchError>> {
        let this = self.clone();
        Box::pin(async move {
            run_blocking(move || {
                let keyword = this.default_keyword.clone();
                this.get_by_term("keyword", &keyword)
            })
            .await
        })
    }

    fn fetch_by_term_value(
        &self,
        field: SearchField,
        value: String,
    ) -> BoxFuture<'static, Result<QueryResultSet, FetchError>> {
        let this = self.clone();
        Box::pin(async move { run_blocking(move || this.get_by_term(field.as_str(), &value)).await })
    }

    fn fetch_by_url(&self, url: String) -> BoxFuture<'static, Result<QueryResultSet, FetchError>> {
        let this = self.clone();
        Box::pin(async move { run_blocking(move || this.get_url(&url)).await })
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Run a blocking ureq call off the async runtime.
async fn run_blocking<F>(call: F) -> Result<QueryResultSet, FetchError>
where
    F: FnOnce() -> Result<QueryResultSet, FetchError> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| FetchError::Network(format!("fetch worker failed: {e}")))?
}

/// Read and decode a response body into a result set.
fn decode_response(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<QueryResultSet, FetchError> {
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| FetchError::Network(format!("failed to read response: {e}")))?;
    decode_payload(&text)
}

/// Decode the query API's JSON payload.
fn decode_payload(text: &str) -> Result<QueryResultSet, FetchError> {
    serde_json::from_str(text).map_err(|e| FetchError::Parse(format!("invalid JSON response: {e}")))
}

/// Map ureq errors onto the core's single fetch-failure kind.
fn map_ureq_error(e: ureq::Error) -> FetchError {
    match e {
        ureq::Error::StatusCode(status) => FetchError::Http { status },
        other => {
            let msg = other.to_string();
            if msg.contains("timed out") || msg.contains("Timeout") {
                FetchError::Timeout
            } else {
                FetchError::Network(msg)
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload_round_trip() {
        let set = decode_payload(
            r#"{"info":{"next":"https://example.test/object?page=2"},"records":[{"title":"Vase"}]}"#,
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0].title.as_deref(), Some("Vase"));
        assert!(set.info.next.is_some());
    }

    #[test]
    fn test_decode_payload_rejects_garbage() {
        let err = decode_payload("<html>not json</html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_status_errors_carry_the_code() {
        let err = map_ureq_error(ureq::Error::StatusCode(404));
        assert!(matches!(err, FetchError::Http { status: 404 }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let config = AppConfig {
            api_base: "http://127.0.0.1:1/object".to_string(),
            ..AppConfig::default()
        };
        let fetcher = HttpFetcher::with_timeout(&config, Duration::from_millis(200));

        let err = fetcher.fetch_initial().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_) | FetchError::Timeout));
    }
}
