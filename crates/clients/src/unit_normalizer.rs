//! Client for the unit normalizer: maps a `(value, unit)` pair onto an
//! SI-like base pair.

use serde::Serialize;

use crate::config::ClientsConfig;
use crate::error::ClientError;
use crate::retry::with_retry;
use crate::types::UnitNormalizeResponse;

#[derive(Clone)]
pub struct UnitNormalizerClient {
    http: reqwest::Client,
    base_url: String,
    config: ClientsConfig,
}

#[derive(Serialize)]
struct NormalizeRequest<'a> {
    value: &'a str,
    unit: &'a str,
}

/// The normalized `(value, unit)` pair, or the original pair unchanged when
/// the service reports `success: false` — callers never special-case this,
/// they just use whatever comes back.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub value: String,
    pub unit: String,
    pub changed: bool,
}

impl UnitNormalizerClient {
    pub fn new(http: reqwest::Client, config: ClientsConfig) -> Self {
        let base_url = config.unit_normalizer_base_url.clone();
        Self { http, base_url, config }
    }

    pub async fn normalize(&self, value: &str, unit: &str) -> Normalized {
        let url = format!("{}/api/v1/normalize", self.base_url);

        let result = with_retry(self.config.retry, || {
            let url = url.clone();
            let payload = NormalizeRequest { value, unit };
            async {
                let resp = self
                    .http
                    .post(&url)
                    .json(&payload)
                    .send()
                    .await
                    .map_err(|source| ClientError::Network { service: "unit_normalizer", source })?;

                let status = resp.status();
                if !status.is_success() {
                    return Err(ClientError::Status { service: "unit_normalizer", status: status.as_u16() });
                }

                resp.json::<UnitNormalizeResponse>()
                    .await
                    .map_err(|source| ClientError::Network { service: "unit_normalizer", source })
            }
        })
        .await;

        match result {
            Ok(r) if r.success => Normalized {
                value: r.base_value.map(|v| v.to_string()).unwrap_or_else(|| value.to_string()),
                unit: r.base_unit.unwrap_or_else(|| unit.to_string()),
                changed: true,
            },
            Ok(_) => Normalized { value: value.to_string(), unit: unit.to_string(), changed: false },
            Err(err) => {
                tracing::warn!(error = %err, value, unit, "unit normalization degraded, keeping original");
                Normalized { value: value.to_string(), unit: unit.to_string(), changed: false }
            }
        }
    }
}
