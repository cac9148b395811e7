//! Paper Relay - Entry Point

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_relay::{
    client::PaperAgentClient,
    config::{Config, server},
    server::RelayServer,
};

#[derive(Parser, Debug)]
#[command(name = "paper-relay")]
#[command(about = "Stateless relay for a remote paper search agent")]
#[command(version)]
struct Cli {
    /// Paper agent API base URL (overrides PAPER_AGENT_API_URL)
    #[arg(long)]
    agent_api_url: Option<String>,

    /// Papers in the first batch of each page (overrides BATCH_SIZE)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Upstream request timeout in seconds (overrides REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Retries for transient upstream failures (overrides MAX_RETRIES)
    #[arg(long)]
    max_retries: Option<u32>,

    /// Comma-separated CORS origins (overrides ALLOWED_ORIGINS)
    #[arg(long, value_delimiter = ',')]
    allowed_origins: Option<Vec<String>>,

    /// Host to bind
    #[arg(long, default_value = server::DEFAULT_HOST, env = "HOST")]
    host: IpAddr,

    /// HTTP server port
    #[arg(long, default_value_t = server::DEFAULT_PORT, env = "PORT")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Layer explicit flags over the environment-derived configuration.
    fn apply(&self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(url) = &self.agent_api_url {
            config.agent_api_url.clone_from(url);
        }
        if let Some(size) = self.batch_size {
            config.batch_size = size;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = self.max_retries {
            config.max_retries = retries;
        }
        if let Some(origins) = &self.allowed_origins {
            config.allowed_origins =
                origins.iter().map(|o| o.trim()).filter(|o| !o.is_empty()).map(String::from).collect();
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = cli.apply(Config::from_env()?)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        agent_api_url = %config.agent_api_url,
        request_timeout = ?config.request_timeout,
        max_retries = config.max_retries,
        "Starting paper relay"
    );

    let client = PaperAgentClient::new(&config)?;
    let server = RelayServer::new(Arc::new(client), &config)?;

    server.run(SocketAddr::new(cli.host, cli.port)).await
}
