//! Configuration for the paper relay.

use std::time::Duration;

use anyhow::Context;

/// Upstream API constants.
pub mod api {
    use std::time::Duration;

    /// Base URL of the remote paper agent API.
    pub const PAPER_AGENT_API: &str = "https://pasa-agent.ai/paper-agent/api/v1";

    /// Endpoint that starts a search for a session.
    pub const SEARCH_ENDPOINT: &str = "single_paper_agent";

    /// Endpoint that returns the current result snapshot for a session.
    pub const RESULT_ENDPOINT: &str = "single_get_result";

    /// Number of papers in the first batch of every page.
    pub const BATCH_SIZE: usize = 50;

    /// Suggested delay between result polls. Advisory only, never enforced.
    pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

    /// Request timeout for a single upstream call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Upstream retries. Zero: a failed call fails the caller's request.
    pub const MAX_RETRIES: u32 = 0;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Caller-facing server defaults.
pub mod server {
    /// Default bind host.
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default bind port.
    pub const DEFAULT_PORT: u16 = 8000;

    /// Origin of the bundled web UI.
    pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5174";
}

/// Environment variable names read by [`Config::from_env`].
pub mod env {
    pub const AGENT_API_URL: &str = "PAPER_AGENT_API_URL";
    pub const BATCH_SIZE: &str = "BATCH_SIZE";
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    pub const MAX_RETRIES: &str = "MAX_RETRIES";
    pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
}

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the paper agent API (overridable for mock servers).
    pub agent_api_url: String,

    /// Size of the first batch of every result page.
    pub batch_size: usize,

    /// Poll interval hint handed to operators and clients.
    pub poll_interval: Duration,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient upstream failures.
    pub max_retries: u32,

    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Create a configuration pointing at the given agent API.
    #[must_use]
    pub fn new(agent_api_url: impl Into<String>) -> Self {
        Self {
            agent_api_url: agent_api_url.into(),
            batch_size: api::BATCH_SIZE,
            poll_interval: api::POLL_INTERVAL,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            allowed_origins: vec![server::DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }

    /// Create a test configuration with a custom URL for mock servers.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..Self::new(base_url)
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns error if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(env::AGENT_API_URL) {
            config.agent_api_url = url;
        }

        if let Some(size) = lookup(env::BATCH_SIZE) {
            config.batch_size =
                size.trim().parse().with_context(|| format!("invalid {}: {size}", env::BATCH_SIZE))?;
        }

        if let Some(secs) = lookup(env::REQUEST_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: {secs}", env::REQUEST_TIMEOUT_SECS))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(retries) = lookup(env::MAX_RETRIES) {
            config.max_retries = retries
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: {retries}", env::MAX_RETRIES))?;
        }

        if let Some(origins) = lookup(env::ALLOWED_ORIGINS) {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns error if the agent URL is not an absolute http(s) URL, the
    /// batch size is zero, or the request timeout is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = url::Url::parse(&self.agent_api_url)
            .with_context(|| format!("invalid agent API URL: {}", self.agent_api_url))?;
        anyhow::ensure!(
            matches!(url.scheme(), "http" | "https"),
            "agent API URL must be http or https, got {}",
            url.scheme()
        );
        anyhow::ensure!(self.batch_size > 0, "batch size must be greater than zero");
        anyhow::ensure!(!self.request_timeout.is_zero(), "request timeout must be non-zero");
        Ok(())
    }

    /// Full URL of an agent endpoint.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.agent_api_url.trim_end_matches('/'), name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::PAPER_AGENT_API)
    }
}
