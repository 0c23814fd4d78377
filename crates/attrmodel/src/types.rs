//! The data model: tender positions, product candidates, and the typed
//! value algebra that everything downstream compares.

use serde::{Deserialize, Serialize};

/// A tender line-item. Immutable within the pipeline: loaded once per
/// message and discarded once its candidates have been scored.
#[derive(Debug, Clone)]
pub struct Position {
    pub id: i64,
    pub tender_id: i64,
    pub title: String,
    pub category: String,
    pub attributes: Vec<PositionAttribute>,
}

#[derive(Debug, Clone)]
pub struct PositionAttribute {
    pub id: i64,
    pub name: String,
    pub value: String,
    pub unit: Option<String>,
}

/// A product returned by the search index as a potential match. Live only
/// during scoring of one position.
#[derive(Debug, Clone)]
pub struct ProductCandidate {
    pub id: i64,
    /// Catalog document id, distinct from `id`; persisted as
    /// `tenders_position_attributes_matches.product_mongo_id`.
    pub mongo_id: String,
    pub title: String,
    pub category: String,
    pub yandex_category: String,
    pub attributes: Vec<ProductAttribute>,
    /// Opaque retrieval score from the search index; not used by the
    /// matching algebra, only carried through for logging.
    pub retrieval_score: f64,
}

/// A candidate's attribute, already standardized upstream. Standardized
/// fields are preferred; original fields are the fallback.
#[derive(Debug, Clone, Default)]
pub struct ProductAttribute {
    pub original_name: Option<String>,
    pub original_value: Option<serde_json::Value>,
    pub standardized_name: Option<String>,
    /// Either a scalar (simple), or an array of `{value, unit}` objects
    /// (range/multiple) — the same shapes the attribute parser itself
    /// produces, since this attribute has already been through the same
    /// standardization upstream.
    pub standardized_value: Option<serde_json::Value>,
    pub standardized_unit: Option<String>,
    /// Declared type from upstream: `simple`, `range`, `multiple`, or
    /// absent (tagged `unknown` during parsing).
    pub attribute_type: Option<String>,
    pub value_lemma: Option<String>,
    pub value_stem: Option<String>,
}

impl ProductAttribute {
    pub fn name(&self) -> &str {
        self.standardized_name
            .as_deref()
            .or(self.original_name.as_deref())
            .unwrap_or_default()
    }

    pub fn value(&self) -> Option<&serde_json::Value> {
        self.standardized_value.as_ref().or(self.original_value.as_ref())
    }

    pub fn unit(&self) -> Option<&str> {
        self.standardized_unit.as_deref()
    }
}

/// One endpoint of a [`TypedValue::Range`]. Infinite bounds carry their
/// unit independently of a magnitude, per the `_inf-`/`_inf+` wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    Finite(f64),
    NegInf,
    PosInf,
}

impl Bound {
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Bound::Finite(v) => Some(*v),
            _ => None,
        }
    }
}

/// The algebra's unit of currency: every parsed attribute value, on either
/// side of a comparison, is one of these five shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Numeric { value: f64, unit: Option<String> },
    String { value: String },
    Boolean { value: bool },
    Range { lower: Bound, upper: Bound, unit: Option<String> },
    /// Each item is itself a simple (non-multiple, non-range) TypedValue.
    Multiple { items: Vec<TypedValue> },
}

/// The final type tag a [`TypedValue`] resolves to. Distinct from the
/// upstream parser's declared type (`simple`/`range`/`multiple`) because
/// `simple` is further refined by the value subtype rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Boolean,
    Numeric,
    String,
    Range,
    Multiple,
    Unknown,
}

impl TypeTag {
    pub const ALL: [TypeTag; 6] = [
        TypeTag::Boolean,
        TypeTag::Numeric,
        TypeTag::String,
        TypeTag::Range,
        TypeTag::Multiple,
        TypeTag::Unknown,
    ];
}

/// Which side of the matching pipeline a [`ParsedAttribute`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Position,
    Candidate,
}

/// An attribute after parsing: original triple preserved for persistence,
/// canonical name/value for comparison.
#[derive(Debug, Clone)]
pub struct ParsedAttribute {
    pub origin: Origin,
    /// Populated for position attributes; `None` for candidate attributes.
    pub position_attr_id: Option<i64>,
    pub original_name: String,
    pub original_value: String,
    pub original_unit: Option<String>,
    pub canonical_name: String,
    pub value: TypedValue,
    pub type_tag: TypeTag,
    /// Precomputed lemma/stem, only ever populated for candidate attributes
    /// (already standardized upstream); `None` for position attributes,
    /// which are lemmatized on demand by `compareStringsLemma` instead.
    pub value_lemma: Option<String>,
    pub value_stem: Option<String>,
}
