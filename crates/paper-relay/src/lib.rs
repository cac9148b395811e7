//! Paper Relay
//!
//! A stateless HTTP relay in front of a remote "paper agent" search API.
//! Callers start a search, then poll for results; every poll fetches the
//! agent's current snapshot, ranks it by score and returns one page.
//!
//! # Features
//!
//! - **Stateless**: sessions live entirely in the remote agent
//! - **Ranked pages**: stable descending sort on each paper's `score`
//! - **Progressive reveal**: a fixed first batch, the tail while the search runs
//! - **Bounded upstream calls**: request/connect timeouts, opt-in retries
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use paper_relay::{client::PaperAgentClient, config::Config, server::RelayServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = PaperAgentClient::new(&config)?;
//!     let server = RelayServer::new(Arc::new(client), &config)?;
//!
//!     server.run(([0, 0, 0, 0], 8000).into()).await
//! }
//! ```

pub mod batcher;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;

pub use batcher::Batcher;
pub use client::{PaperAgent, PaperAgentClient};
pub use config::Config;
pub use error::{ApiError, BatchError, ClientError};
