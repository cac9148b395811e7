//! Configuration loading tests.
//!
//! Uses `Config::from_lookup` so no process environment is touched.

use std::collections::HashMap;
use std::time::Duration;

use paper_relay::config::{Config, api, env};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_empty_environment_uses_defaults() {
    let config = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.agent_api_url, api::PAPER_AGENT_API);
    assert_eq!(config.batch_size, api::BATCH_SIZE);
    assert_eq!(config.request_timeout, api::REQUEST_TIMEOUT);
    assert_eq!(config.max_retries, 0);
    assert_eq!(config.allowed_origins, vec!["http://localhost:5174".to_string()]);
}

#[test]
fn test_environment_overrides() {
    let config = Config::from_lookup(lookup(&[
        (env::AGENT_API_URL, "http://localhost:9999/v1"),
        (env::BATCH_SIZE, "20"),
        (env::REQUEST_TIMEOUT_SECS, "5"),
        (env::MAX_RETRIES, "2"),
        (env::ALLOWED_ORIGINS, "http://a.test, http://b.test,,"),
    ]))
    .unwrap();

    assert_eq!(config.agent_api_url, "http://localhost:9999/v1");
    assert_eq!(config.batch_size, 20);
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
}

#[test]
fn test_invalid_batch_size_names_variable() {
    let err = Config::from_lookup(lookup(&[(env::BATCH_SIZE, "lots")])).unwrap_err();
    assert!(err.to_string().contains(env::BATCH_SIZE));
}

#[test]
fn test_zero_batch_size_rejected() {
    assert!(Config::from_lookup(lookup(&[(env::BATCH_SIZE, "0")])).is_err());
}

#[test]
fn test_non_http_url_rejected() {
    assert!(Config::from_lookup(lookup(&[(env::AGENT_API_URL, "ftp://agent")])).is_err());
    assert!(Config::from_lookup(lookup(&[(env::AGENT_API_URL, "agent.local")])).is_err());
}

#[test]
fn test_for_testing_uses_short_timeouts() {
    let config = Config::for_testing("http://127.0.0.1:1234");
    assert_eq!(config.agent_api_url, "http://127.0.0.1:1234");
    assert!(config.request_timeout < api::REQUEST_TIMEOUT);
    assert!(config.validate().is_ok());
}
