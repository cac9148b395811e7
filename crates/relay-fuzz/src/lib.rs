//! Fuzzing library for paper-relay.
//!
//! This crate provides fuzzing targets for the result batcher, which parses
//! whatever the remote paper agent sends back.
//!
//! # Usage
//!
//! ```bash
//! cd crates/relay-fuzz
//! cargo +nightly fuzz run fuzz_batch_payload -- -max_total_time=60
//! ```

pub use paper_relay::{batcher, models};
