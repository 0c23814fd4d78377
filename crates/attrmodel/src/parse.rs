//! Turns raw position/candidate attributes into [`ParsedAttribute`]s, and
//! groups a candidate's parsed attributes by type tag.

use std::collections::BTreeMap;

use clients::{AttrParserClient, ParsedAttributeBlob, UnitNormalizerClient};
use serde_json::Value;

use crate::subtype::determine_value_subtype;
use crate::types::{Bound, Origin, ParsedAttribute, Position, ProductAttribute, ProductCandidate, TypeTag, TypedValue};

/// A candidate's (or position's) parsed attributes, partitioned by final
/// type tag, each list preserving insertion order. `all` is derived on
/// demand rather than stored, per the design notes.
#[derive(Debug, Clone, Default)]
pub struct GroupedAttributes {
    pub by_tag: BTreeMap<TypeTag, Vec<ParsedAttribute>>,
}

impl GroupedAttributes {
    pub fn group(attrs: Vec<ParsedAttribute>) -> Self {
        let mut by_tag: BTreeMap<TypeTag, Vec<ParsedAttribute>> = BTreeMap::new();
        for attr in attrs {
            by_tag.entry(attr.type_tag).or_default().push(attr);
        }
        Self { by_tag }
    }

    pub fn get(&self, tag: TypeTag) -> &[ParsedAttribute] {
        self.by_tag.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all(&self) -> impl Iterator<Item = &ParsedAttribute> {
        self.by_tag.values().flatten()
    }
}

fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn normalize_numeric(
    unit_normalizer: &UnitNormalizerClient,
    raw_value: &Value,
    raw_unit: Option<&str>,
) -> (f64, Option<String>) {
    let value_str = value_to_string(raw_value);
    match raw_unit {
        Some(unit) if !unit.is_empty() => {
            let normalized = unit_normalizer.normalize(&value_str, unit).await;
            let value = normalized.value.replace(',', ".").parse::<f64>().unwrap_or_else(|_| {
                value_str.replace(',', ".").parse::<f64>().unwrap_or(0.0)
            });
            (value, Some(normalized.unit))
        }
        _ => {
            let value = value_str.replace(',', ".").parse::<f64>().unwrap_or(0.0);
            (value, None)
        }
    }
}

async fn normalize_bound(
    unit_normalizer: &UnitNormalizerClient,
    raw_value: &Value,
    raw_unit: Option<&str>,
) -> (Bound, Option<String>) {
    if let Some(tag) = raw_value.as_str() {
        if tag == "_inf-" || tag == "_inf+" {
            let bound = if tag == "_inf-" { Bound::NegInf } else { Bound::PosInf };
            let unit = match raw_unit {
                Some(unit) if !unit.is_empty() => {
                    Some(unit_normalizer.normalize("1", unit).await.unit)
                }
                _ => raw_unit.map(str::to_string),
            };
            return (bound, unit);
        }
    }
    let (value, unit) = normalize_numeric(unit_normalizer, raw_value, raw_unit).await;
    (Bound::Finite(value), unit)
}

/// Interprets a parser/standardizer value blob (`{value, unit}` for simple,
/// `[{...},{...}]` for range, `[{...}, ...]` for multiple) into a
/// [`TypedValue`] plus its final type tag, performing unit normalization
/// along the way per §4.2.
async fn interpret_value(
    declared_kind: &str,
    value: &Value,
    unit_normalizer: &UnitNormalizerClient,
) -> (TypedValue, TypeTag) {
    match declared_kind {
        "range" => {
            let items = value.as_array().cloned().unwrap_or_default();
            if items.len() != 2 {
                return (TypedValue::String { value: value_to_string(value) }, TypeTag::String);
            }
            let lower_raw = items[0].get("value").cloned().unwrap_or(Value::Null);
            let lower_unit = items[0].get("unit").and_then(Value::as_str);
            let upper_raw = items[1].get("value").cloned().unwrap_or(Value::Null);
            let upper_unit = items[1].get("unit").and_then(Value::as_str);

            let (lower, lu) = normalize_bound(unit_normalizer, &lower_raw, lower_unit).await;
            let (upper, uu) = normalize_bound(unit_normalizer, &upper_raw, upper_unit).await;
            let unit = lu.or(uu);
            (TypedValue::Range { lower, upper, unit }, TypeTag::Range)
        }
        "multiple" => {
            let items_raw = value.as_array().cloned().unwrap_or_default();
            let mut items = Vec::with_capacity(items_raw.len());
            for item in items_raw {
                let item_value = item.get("value").cloned().unwrap_or(Value::Null);
                let item_unit = item.get("unit").and_then(Value::as_str);
                let subtype = determine_value_subtype(&item_value);
                let typed = match subtype {
                    TypeTag::Numeric => {
                        let (value, unit) = normalize_numeric(unit_normalizer, &item_value, item_unit).await;
                        TypedValue::Numeric { value, unit }
                    }
                    TypeTag::Boolean => TypedValue::Boolean { value: is_truthy_literal(&item_value) },
                    _ => TypedValue::String { value: value_to_string(&item_value) },
                };
                items.push(typed);
            }
            (TypedValue::Multiple { items }, TypeTag::Multiple)
        }
        _ => {
            // "simple" (or an unrecognized declared kind, treated the same way)
            let raw_value = value.get("value").cloned().unwrap_or_else(|| value.clone());
            let raw_unit = value.get("unit").and_then(Value::as_str);
            let subtype = determine_value_subtype(&raw_value);
            let typed = match subtype {
                TypeTag::Boolean => TypedValue::Boolean { value: is_truthy_literal(&raw_value) },
                TypeTag::Numeric => {
                    let (value, unit) = normalize_numeric(unit_normalizer, &raw_value, raw_unit).await;
                    TypedValue::Numeric { value, unit }
                }
                _ => TypedValue::String { value: value_to_string(&raw_value) },
            };
            (typed, subtype)
        }
    }
}

fn is_truthy_literal(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::String(s) => {
            matches!(s.trim().to_lowercase().as_str(), "да" | "true" | "yes" | "есть" | "имеется" | "1" | "вкл" | "включено")
        }
        _ => false,
    }
}

/// Parses one position attribute per §4.2: standardize the raw triple via
/// the attribute parser, classify, normalize. Returns `None` when the
/// attribute parser has nothing to say about it.
pub async fn parse_position_attribute(
    attr: &crate::types::PositionAttribute,
    attr_parser: &AttrParserClient,
    unit_normalizer: &UnitNormalizerClient,
) -> Option<ParsedAttribute> {
    let unit = attr.unit.clone().unwrap_or_default();
    let raw_string = format!("{}: {} {}", attr.name, attr.value, unit).trim().to_string();
    if raw_string.is_empty() {
        return None;
    }

    let blob: ParsedAttributeBlob = attr_parser.parse_one(&raw_string).await?;
    let (typed, tag) = interpret_value(&blob.kind, &blob.value, unit_normalizer).await;

    Some(ParsedAttribute {
        origin: Origin::Position,
        position_attr_id: Some(attr.id),
        original_name: attr.name.clone(),
        original_value: attr.value.clone(),
        original_unit: attr.unit.clone(),
        canonical_name: blob.name,
        value: typed,
        type_tag: tag,
        value_lemma: None,
        value_stem: None,
    })
}

pub async fn parse_position_attributes(
    position: &Position,
    attr_parser: &AttrParserClient,
    unit_normalizer: &UnitNormalizerClient,
) -> Vec<ParsedAttribute> {
    let mut parsed = Vec::with_capacity(position.attributes.len());
    for attr in &position.attributes {
        match parse_position_attribute(attr, attr_parser, unit_normalizer).await {
            Some(p) => parsed.push(p),
            None => tracing::debug!(attr_id = attr.id, name = %attr.name, "position attribute not parsed"),
        }
    }
    parsed
}

/// Parses one candidate attribute. Candidates are already standardized
/// upstream, so no AttrParser call is needed — only unit normalization.
pub async fn parse_candidate_attribute(
    attr: &ProductAttribute,
    unit_normalizer: &UnitNormalizerClient,
) -> Option<ParsedAttribute> {
    let kind = attr.attribute_type.as_deref().unwrap_or("unknown");
    let value = attr.value()?.clone();

    let (typed, tag) = match kind {
        "range" | "multiple" => interpret_value(kind, &value, unit_normalizer).await,
        "simple" => {
            let subtype = determine_value_subtype(&value);
            let typed = match subtype {
                TypeTag::Boolean => TypedValue::Boolean { value: is_truthy_literal(&value) },
                TypeTag::Numeric => {
                    let (v, u) = normalize_numeric(unit_normalizer, &value, attr.unit()).await;
                    TypedValue::Numeric { value: v, unit: u }
                }
                _ => TypedValue::String { value: value_to_string(&value) },
            };
            (typed, subtype)
        }
        _ => (TypedValue::String { value: value_to_string(&value) }, TypeTag::Unknown),
    };

    Some(ParsedAttribute {
        origin: Origin::Candidate,
        position_attr_id: None,
        original_name: attr.name().to_string(),
        original_value: value_to_string(&value),
        original_unit: attr.unit().map(str::to_string),
        canonical_name: attr.name().to_string(),
        value: typed,
        type_tag: tag,
        value_lemma: attr.value_lemma.clone(),
        value_stem: attr.value_stem.clone(),
    })
}

pub async fn parse_candidate(
    candidate: &ProductCandidate,
    unit_normalizer: &UnitNormalizerClient,
) -> GroupedAttributes {
    let mut parsed = Vec::with_capacity(candidate.attributes.len());
    for attr in &candidate.attributes {
        if let Some(p) = parse_candidate_attribute(attr, unit_normalizer).await {
            parsed.push(p);
        }
    }
    GroupedAttributes::group(parsed)
}
