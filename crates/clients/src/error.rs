//! Error type shared by every external client in this crate.

/// Failure modes surfaced by a single external call.
///
/// Per the error policy, none of these ever abort the pipeline: callers
/// degrade to a neutral result (empty parse, failed normalization, score 0)
/// and log the variant instead of propagating it further than the call site.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {service} failed: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("{service} response could not be decoded: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Whether this failure is worth retrying: network errors and 5xx are,
    /// 4xx is a shape/auth problem that will not heal on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network { .. } => true,
            ClientError::Status { status, .. } => *status >= 500,
            ClientError::Decode { .. } => false,
        }
    }
}
