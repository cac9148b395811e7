//! Paper agent API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Request and connect timeouts on every call
//! - Opt-in retry middleware with exponential backoff

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Serialize;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{AgentResultRequest, AgentSearchRequest, RawResults};

/// Operations the relay needs from the remote paper agent.
#[async_trait::async_trait]
pub trait PaperAgent: Send + Sync {
    /// Start a search for `query` under `session_id`.
    async fn start_search(&self, query: &str, session_id: Option<&str>) -> ClientResult<()>;

    /// Fetch the current result snapshot of a session.
    async fn fetch_results(&self, session_id: &str) -> ClientResult<RawResults>;
}

/// HTTP client for the paper agent API.
#[derive(Clone)]
pub struct PaperAgentClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Search start endpoint URL.
    search_url: String,

    /// Result polling endpoint URL.
    result_url: String,

    /// Request timeout, reported on timeout errors.
    request_timeout: Duration,
}

impl PaperAgentClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or HTTP client
    /// initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let mut builder = ClientBuilder::new(client);
        if config.max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder()
                .retry_bounds(Duration::from_millis(500), Duration::from_secs(10))
                .build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(Self {
            client: builder.build(),
            search_url: config.endpoint(api::SEARCH_ENDPOINT),
            result_url: config.endpoint(api::RESULT_ENDPOINT),
            request_timeout: config.request_timeout,
        })
    }

    /// Search start endpoint URL.
    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Result polling endpoint URL.
    #[must_use]
    pub fn result_url(&self) -> &str {
        &self.result_url
    }

    /// Make a POST request with a JSON body.
    async fn post<B>(&self, url: &str, body: &B) -> ClientResult<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let body_str = serde_json::to_string(body)?;

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_str)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, self.request_timeout))?;

        Self::handle_response(response).await
    }

    /// Reject any non-2xx response, keeping the body as the message.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("no response body").to_string()
        } else {
            text
        };

        Err(ClientError::status(status.as_u16(), message))
    }
}

#[async_trait::async_trait]
impl PaperAgent for PaperAgentClient {
    async fn start_search(&self, query: &str, session_id: Option<&str>) -> ClientResult<()> {
        tracing::debug!(url = %self.search_url, session_id = ?session_id, "Starting agent search");

        let body = AgentSearchRequest { user_query: query, session_id };
        self.post(&self.search_url, &body).await?;
        Ok(())
    }

    async fn fetch_results(&self, session_id: &str) -> ClientResult<RawResults> {
        tracing::debug!(url = %self.result_url, session_id, "Fetching agent results");

        let body = AgentResultRequest { session_id };
        let response = self.post(&self.result_url, &body).await?;
        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }
}

impl std::fmt::Debug for PaperAgentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperAgentClient")
            .field("search_url", &self.search_url)
            .field("result_url", &self.result_url)
            .finish()
    }
}
