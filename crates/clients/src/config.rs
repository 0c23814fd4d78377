//! Connection configuration shared by every client in this crate.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Base URLs and pool/retry tuning for the three NLP microservices and the
/// search index. Constructed once at startup and cloned into each client.
#[derive(Debug, Clone)]
pub struct ClientsConfig {
    pub attr_parser_base_url: String,
    pub unit_normalizer_base_url: String,
    pub semantic_matcher_base_url: String,
    pub request_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub retry: RetryPolicy,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            attr_parser_base_url: "http://localhost:8000".to_string(),
            unit_normalizer_base_url: "http://localhost:8001".to_string(),
            semantic_matcher_base_url: "http://localhost:8081".to_string(),
            request_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 32,
            retry: RetryPolicy::default(),
        }
    }
}

/// Builds the single pooled [`reqwest::Client`] shared by every client in
/// this crate. Per the design notes, the pool is a process-wide handle
/// created once and passed explicitly to callers rather than a hidden
/// global guarded by a lazy-init mutex.
pub fn build_http_client(config: &ClientsConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .build()
}
