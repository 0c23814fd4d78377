//! Client for the full-text candidate search index. The query contract
//! itself is opaque to this service; only the response shape is load-bearing.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ClientError;
use crate::retry::with_retry;
use crate::types::{RawCandidate, SearchEnvelope};
use crate::ClientsConfig;

/// Abstracts "retrieve candidates for a position" so the matching pipeline
/// can be driven by fixtures in tests without a live search cluster.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn find(&self, index: &str, query: &serde_json::Value) -> Vec<RawCandidate>;
}

#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
    config: ClientsConfig,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    index: &'a str,
    query: &'a serde_json::Value,
}

impl SearchClient {
    pub fn new(http: reqwest::Client, base_url: String, config: ClientsConfig) -> Self {
        Self { http, base_url, config }
    }
}

#[async_trait]
impl SearchIndex for SearchClient {
    /// Degrades to an empty candidate list on any failure: a position with
    /// no retrievable candidates simply scores nothing, it never aborts the
    /// tender.
    async fn find(&self, index: &str, query: &serde_json::Value) -> Vec<RawCandidate> {
        let url = self.base_url.clone();
        let payload = SearchRequest { index, query };

        let result = with_retry(self.config.retry, || {
            let url = url.clone();
            let payload = &payload;
            async move {
                let resp = self
                    .http
                    .post(&url)
                    .json(payload)
                    .send()
                    .await
                    .map_err(|source| ClientError::Network { service: "search_index", source })?;

                let status = resp.status();
                if !status.is_success() {
                    return Err(ClientError::Status { service: "search_index", status: status.as_u16() });
                }

                resp.json::<SearchEnvelope>()
                    .await
                    .map_err(|source| ClientError::Network { service: "search_index", source })
            }
        })
        .await;

        match result {
            Ok(envelope) => envelope
                .hits
                .hits
                .into_iter()
                .map(|h| {
                    let mut source = h.source;
                    if source.mongo_id.is_empty() {
                        source.mongo_id = h.id;
                    }
                    source.retrieval_score = h.score;
                    source
                })
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, index, "candidate retrieval degraded to empty set");
                Vec::new()
            }
        }
    }
}
