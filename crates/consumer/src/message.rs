//! The inbound message body from `matching_queue`.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TenderReadyMessage {
    pub tender_id: i64,
    #[serde(default)]
    pub tender_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
}
