//! Client for the attribute standardizer: turns a free-text
//! `"{name}: {value} {unit}"` string into a typed parse blob.

use crate::config::ClientsConfig;
use crate::error::ClientError;
use crate::retry::with_retry;
use crate::types::ParsedAttributeBlob;

#[derive(Clone)]
pub struct AttrParserClient {
    http: reqwest::Client,
    base_url: String,
    config: ClientsConfig,
}

impl AttrParserClient {
    pub fn new(http: reqwest::Client, config: ClientsConfig) -> Self {
        let base_url = config.attr_parser_base_url.clone();
        Self { http, base_url, config }
    }

    /// Parses one raw string. An absent or empty response degrades to
    /// `None` rather than an error — callers drop the attribute.
    pub async fn parse_one(&self, text: &str) -> Option<ParsedAttributeBlob> {
        let url = format!("{}/standardize", self.base_url);
        let body = vec![text.to_string()];

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
                    .map_err(|source| ClientError::Network { service: "attr_parser", source })?;

                let status = resp.status();
                if !status.is_success() {
                    return Err(ClientError::Status { service: "attr_parser", status: status.as_u16() });
                }

                let bytes = resp
                    .bytes()
                    .await
                    .map_err(|source| ClientError::Network { service: "attr_parser", source })?;

                serde_json::from_slice::<Vec<ParsedAttributeBlob>>(&bytes)
                    .map_err(|source| ClientError::Decode { service: "attr_parser", source })
            }
        })
        .await;

        match result {
            Ok(mut blobs) if !blobs.is_empty() => Some(blobs.remove(0)),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "attribute parser degraded to empty result");
                None
            }
        }
    }
}
