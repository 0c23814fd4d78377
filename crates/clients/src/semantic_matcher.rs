//! Client for the semantic similarity service. The batch endpoint is the
//! latency-dominant call in the whole pipeline, so it is preferred at every
//! call site that compares more than one pair.

use crate::config::ClientsConfig;
use crate::error::ClientError;
use crate::retry::with_retry;
use crate::types::SemanticScoreResponse;

#[derive(Clone)]
pub struct SemanticMatcherClient {
    http: reqwest::Client,
    base_url: String,
    config: ClientsConfig,
}

impl SemanticMatcherClient {
    pub fn new(http: reqwest::Client, config: ClientsConfig) -> Self {
        let base_url = config.semantic_matcher_base_url.clone();
        Self { http, base_url, config }
    }

    /// Degrades to `0.0` on any failure: a name comparison that can't be
    /// scored simply fails to match rather than aborting the candidate.
    pub async fn compare_one(&self, a: &str, b: &str) -> f64 {
        let url = format!("{}/api/v1/comparsion/strings", self.base_url);
        let pair = [a.to_string(), b.to_string()];

        let result = with_retry(self.config.retry, || {
            let url = url.clone();
            let pair = pair.clone();
            async {
                let resp = self
                    .http
                    .post(&url)
                    .json(&pair)
                    .send()
                    .await
                    .map_err(|source| ClientError::Network { service: "semantic_matcher", source })?;

                let status = resp.status();
                if !status.is_success() {
                    return Err(ClientError::Status { service: "semantic_matcher", status: status.as_u16() });
                }

                resp.json::<SemanticScoreResponse>()
                    .await
                    .map_err(|source| ClientError::Network { service: "semantic_matcher", source })
            }
        })
        .await;

        match result {
            Ok(r) => r.score,
            Err(err) => {
                tracing::warn!(error = %err, "semantic compare_one degraded to score 0.0");
                0.0
            }
        }
    }

    /// Scores every `(a, b)` pair in one round trip, preserving input order.
    /// A missized response (should never happen) degrades every pair to 0.0
    /// rather than panicking on index mismatch.
    pub async fn compare_batch(&self, pairs: &[(String, String)]) -> Vec<f64> {
        if pairs.is_empty() {
            return Vec::new();
        }

        let url = format!("{}/api/v1/comparsion/strings/batch", self.base_url);
        let body: Vec<[String; 2]> = pairs.iter().map(|(a, b)| [a.clone(), b.clone()]).collect();

        let result = with_retry(self.config.retry, || {
            let url = url.clone();
            let body = body.clone();
            async {
                let resp = self
                    .http
                    .post(&url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|source| ClientError::Network { service: "semantic_matcher", source })?;

                let status = resp.status();
                if !status.is_success() {
                    return Err(ClientError::Status { service: "semantic_matcher", status: status.as_u16() });
                }

                resp.json::<Vec<f64>>()
                    .await
                    .map_err(|source| ClientError::Network { service: "semantic_matcher", source })
            }
        })
        .await;

        match result {
            Ok(scores) if scores.len() == pairs.len() => scores,
            Ok(_) => {
                tracing::warn!("semantic compare_batch returned mismatched length, degrading to zeros");
                vec![0.0; pairs.len()]
            }
            Err(err) => {
                tracing::warn!(error = %err, "semantic compare_batch degraded to zeros");
                vec![0.0; pairs.len()]
            }
        }
    }
}
