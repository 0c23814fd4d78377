//! Wire-shaped response DTOs. These mirror the JSON contracts in the
//! external interfaces list verbatim; no domain interpretation happens here
//! — that is `attrmodel`'s job.

use serde::Deserialize;

/// One element of the attribute parser's `/standardize` response.
/// `value`'s shape depends on `kind` (`simple` → object, `range`/`multiple`
/// → array), so it is left as [`serde_json::Value`] for the caller to
/// interpret once `kind` is known.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedAttributeBlob {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitNormalizeResponse {
    #[serde(default)]
    pub success: bool,
    pub base_value: Option<f64>,
    pub base_unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticScoreResponse {
    #[serde(default)]
    pub score: f64,
}

/// Raw hit as returned by the search index. Pre-standardized attributes are
/// carried through as-is; `attrmodel` decides how to interpret them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCandidate {
    pub id: i64,
    /// The product's catalog document id, distinct from `id` (the
    /// relational integer key used in `tender_matches.product_id`) —
    /// carried through to `tenders_position_attributes_matches.product_mongo_id`.
    /// Populated from the search hit's `_id` field in [`crate::search`],
    /// since the index itself never nests it under `_source`.
    #[serde(default)]
    pub mongo_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "yandex_category")]
    pub yandex_category: String,
    #[serde(default)]
    pub attributes: Vec<RawCandidateAttribute>,
    /// Opaque retrieval score, populated from the enclosing hit's `_score`
    /// in [`crate::search`] rather than carried inside `_source`.
    #[serde(default)]
    pub retrieval_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCandidateAttribute {
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub original_value: Option<serde_json::Value>,
    #[serde(default)]
    pub standardized_name: Option<String>,
    #[serde(default)]
    pub standardized_value: Option<serde_json::Value>,
    #[serde(default)]
    pub standardized_unit: Option<String>,
    #[serde(default)]
    pub attribute_type: Option<String>,
    #[serde(default)]
    pub value_lemma: Option<String>,
    #[serde(default)]
    pub value_stem: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    pub hits: SearchHits,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHits {
    pub hits: Vec<SearchHitSource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHitSource {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, rename = "_score")]
    pub score: f64,
    #[serde(rename = "_source")]
    pub source: RawCandidate,
}
