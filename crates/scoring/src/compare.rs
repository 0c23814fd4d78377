//! The value comparison algebra: a total function on `(TypeTag, TypeTag)`
//! dispatched through a 5×5 table, replacing the source's runtime
//! `isinstance` checks.

use attrmodel::{Bound, ParsedAttribute, TypeTag, TypedValue};
use clients::UnitNormalizerClient;

use crate::lemma::Lemmatizer;

/// Tunable thresholds the design notes call out as configuration rather
/// than literals (the 10% numeric tolerance chief among them).
#[derive(Debug, Clone, Copy)]
pub struct ComparatorConfig {
    /// Gate for `compareNamesNGram`'s ngram-sum check.
    pub name_ngram_threshold: f64,
    /// Gate for `compareMultipleTextual`'s cross-pair ngram-sum check
    /// (`THRESHOLD_VALUE_MATCH`).
    pub multiple_textual_threshold: f64,
    /// Relative tolerance for `compareNumeric`/`numericInRange`.
    pub numeric_tolerance: f64,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            name_ngram_threshold: 0.7,
            multiple_textual_threshold: 0.85,
            numeric_tolerance: 0.1,
        }
    }
}

pub struct ValueComparator<'a> {
    pub config: ComparatorConfig,
    pub unit_normalizer: &'a UnitNormalizerClient,
    /// Optional injected lemmatizer capability for `compareStringsLemma`.
    /// Absent by default, per §10.5 — this is a seam, not a bundled model.
    pub lemmatizer: Option<&'a dyn Lemmatizer>,
}

impl<'a> ValueComparator<'a> {
    pub fn new(config: ComparatorConfig, unit_normalizer: &'a UnitNormalizerClient) -> Self {
        Self { config, unit_normalizer, lemmatizer: None }
    }

    pub fn with_lemmatizer(mut self, lemmatizer: &'a dyn Lemmatizer) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    /// Dispatches on `(pos.type_tag, cand.type_tag)` per the §4.4 table.
    /// Off-diagonal cells not listed there are rejected.
    pub async fn compare(&self, pos: &ParsedAttribute, cand: &ParsedAttribute) -> bool {
        use TypeTag::*;
        match (pos.type_tag, cand.type_tag) {
            (Boolean, Boolean) | (Boolean, String) | (Boolean, Multiple) | (Multiple, Boolean) | (String, Boolean) => {
                self.compare_names_ngram(&pos.canonical_name, &cand.canonical_name)
            }
            (Numeric, Numeric) => self.compare_numeric(&pos.value, &cand.value).await,
            (Numeric, Range) => self.numeric_in_range(&pos.value, &cand.value).await,
            (String, String) => self.compare_strings_lemma(pos, cand),
            (String, Multiple) => self.compare_multiple_textual(&pos.value, &cand.value),
            (Range, Numeric) => self.numeric_in_range(&cand.value, &pos.value).await,
            (Range, Range) => self.ranges_intersect(&pos.value, &cand.value).await,
            (Multiple, String) | (Multiple, Multiple) => self.compare_multiple_textual(&pos.value, &cand.value),
            _ => false,
        }
    }

    /// Booleans carry no informative value ("да"/"нет"); two boolean-typed
    /// attributes (or a boolean paired with a string/multiple) match when
    /// their *names* agree, never their payload.
    fn compare_names_ngram(&self, pos_name: &str, cand_name: &str) -> bool {
        ngram::sim(pos_name, cand_name) >= self.config.name_ngram_threshold
    }

    /// `|a-b| / max(|a|,|b|,1) ≤ tolerance` when units already match;
    /// normalizes both sides through the unit service first when they
    /// differ and both are present.
    pub async fn compare_numeric(&self, a: &TypedValue, b: &TypedValue) -> bool {
        let (TypedValue::Numeric { value: av, unit: au }, TypedValue::Numeric { value: bv, unit: bu }) = (a, b) else {
            return false;
        };

        let (av, bv) = if au == bu {
            (*av, *bv)
        } else if let (Some(au), Some(bu)) = (au, bu) {
            let a_norm = self.unit_normalizer.normalize(&av.to_string(), au).await;
            let b_norm = self.unit_normalizer.normalize(&bv.to_string(), bu).await;
            let a_val = a_norm.value.parse::<f64>().unwrap_or(*av);
            let b_val = b_norm.value.parse::<f64>().unwrap_or(*bv);
            if a_norm.unit != b_norm.unit {
                return false;
            }
            (a_val, b_val)
        } else {
            return false;
        };

        let denom = av.abs().max(bv.abs()).max(1.0);
        (av - bv).abs() / denom <= self.config.numeric_tolerance
    }

    /// Treats `NegInf`/`PosInf` as unbounded; accepts a closed interval.
    pub async fn numeric_in_range(&self, value: &TypedValue, range: &TypedValue) -> bool {
        let (TypedValue::Numeric { value: v, unit: vu }, TypedValue::Range { lower, upper, unit: ru }) = (value, range) else {
            return false;
        };

        let v = if vu != ru {
            if let (Some(vu), Some(ru)) = (vu, ru) {
                let normalized = self.unit_normalizer.normalize(&v.to_string(), vu).await;
                if normalized.unit != *ru {
                    return false;
                }
                normalized.value.parse::<f64>().unwrap_or(*v)
            } else if vu.is_some() || ru.is_some() {
                return false;
            } else {
                *v
            }
        } else {
            *v
        };

        let lower_ok = match lower {
            Bound::NegInf => true,
            Bound::PosInf => false,
            Bound::Finite(l) => v >= *l,
        };
        let upper_ok = match upper {
            Bound::PosInf => true,
            Bound::NegInf => false,
            Bound::Finite(u) => v <= *u,
        };
        lower_ok && upper_ok
    }

    /// Symmetric by construction: `a.lower ≤ b.upper ∧ b.lower ≤ a.upper`.
    pub async fn ranges_intersect(&self, a: &TypedValue, b: &TypedValue) -> bool {
        let (TypedValue::Range { lower: al, upper: au, unit: aunit }, TypedValue::Range { lower: bl, upper: bu, unit: bunit }) = (a, b) else {
            return false;
        };
        if aunit != bunit && (aunit.is_some() || bunit.is_some()) {
            return false;
        }

        fn le(x: Bound, y: Bound) -> bool {
            match (x, y) {
                (Bound::NegInf, _) | (_, Bound::PosInf) => true,
                (_, Bound::NegInf) | (Bound::PosInf, _) => false,
                (Bound::Finite(a), Bound::Finite(b)) => a <= b,
            }
        }
        le(*al, *bu) && le(*bl, *au)
    }

    /// Equality of precomputed lemmas when both sides have one (candidates
    /// are pre-lemmatized upstream; positions never are). Otherwise
    /// lemmatizes the position value on demand via the injected
    /// [`Lemmatizer`], falling back to its stem, and finally to
    /// case-insensitive trimmed equality when no lemmatizer is configured.
    pub fn compare_strings_lemma(&self, pos: &ParsedAttribute, cand: &ParsedAttribute) -> bool {
        let (TypedValue::String { value: pos_value }, TypedValue::String { value: cand_value }) = (&pos.value, &cand.value) else {
            return false;
        };

        if let Some(cand_lemma) = &cand.value_lemma {
            if let Some(lemmatizer) = self.lemmatizer {
                if let Some(pos_lemma) = lemmatizer.lemmatize(pos_value) {
                    return pos_lemma.eq_ignore_ascii_case(cand_lemma);
                }
                if let Some(cand_stem) = &cand.value_stem {
                    if let Some(pos_stem) = lemmatizer.stem(pos_value) {
                        return pos_stem.eq_ignore_ascii_case(cand_stem);
                    }
                }
            }
        }

        crate::lemma::equal_ignoring_case(pos_value, cand_value)
    }

    /// Accepts when any cross pair of textual items clears the ngram-sum
    /// threshold.
    pub fn compare_multiple_textual(&self, a: &TypedValue, b: &TypedValue) -> bool {
        let a_items = Self::textual_items(a);
        let b_items = Self::textual_items(b);
        a_items.iter().any(|x| b_items.iter().any(|y| ngram::sim(x, y) >= self.config.multiple_textual_threshold))
    }

    fn textual_items(v: &TypedValue) -> Vec<String> {
        match v {
            TypedValue::String { value } => vec![value.clone()],
            TypedValue::Multiple { items } => items
                .iter()
                .filter_map(|i| match i {
                    TypedValue::String { value } => Some(value.clone()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparator(unit_normalizer: &UnitNormalizerClient) -> ValueComparator<'_> {
        ValueComparator::new(ComparatorConfig::default(), unit_normalizer)
    }

    fn http_client() -> UnitNormalizerClient {
        UnitNormalizerClient::new(reqwest::Client::new(), clients::ClientsConfig::default())
    }

    #[tokio::test]
    async fn numeric_within_tolerance_matches() {
        let un = http_client();
        let cmp = comparator(&un);
        let a = TypedValue::Numeric { value: 100.0, unit: Some("см".into()) };
        let b = TypedValue::Numeric { value: 105.0, unit: Some("см".into()) };
        assert!(cmp.compare_numeric(&a, &b).await);
    }

    #[tokio::test]
    async fn numeric_outside_tolerance_rejects() {
        let un = http_client();
        let cmp = comparator(&un);
        let a = TypedValue::Numeric { value: 100.0, unit: Some("см".into()) };
        let b = TypedValue::Numeric { value: 200.0, unit: Some("см".into()) };
        assert!(!cmp.compare_numeric(&a, &b).await);
    }

    #[tokio::test]
    async fn ranges_intersect_is_symmetric() {
        let un = http_client();
        let cmp = comparator(&un);
        let a = TypedValue::Range { lower: Bound::Finite(1.0), upper: Bound::Finite(12.0), unit: Some("В".into()) };
        let b = TypedValue::Range { lower: Bound::Finite(5.0), upper: Bound::Finite(20.0), unit: Some("В".into()) };
        assert_eq!(cmp.ranges_intersect(&a, &b).await, cmp.ranges_intersect(&b, &a).await);
        assert!(cmp.ranges_intersect(&a, &b).await);
    }

    #[tokio::test]
    async fn neg_inf_bound_is_unbounded_below() {
        let un = http_client();
        let cmp = comparator(&un);
        let value = TypedValue::Numeric { value: -1000.0, unit: None };
        let range = TypedValue::Range { lower: Bound::NegInf, upper: Bound::Finite(10.0), unit: None };
        assert!(cmp.numeric_in_range(&value, &range).await);
    }

    fn string_attr(name: &str, value: &str, lemma: Option<&str>) -> ParsedAttribute {
        ParsedAttribute {
            origin: attrmodel::Origin::Position,
            position_attr_id: None,
            original_name: name.to_string(),
            original_value: value.to_string(),
            original_unit: None,
            canonical_name: name.to_string(),
            value: TypedValue::String { value: value.to_string() },
            type_tag: TypeTag::String,
            value_lemma: lemma.map(str::to_string),
            value_stem: None,
        }
    }

    #[test]
    fn string_lemma_falls_back_to_case_insensitive_equality_without_lemmatizer() {
        let un = http_client();
        let cmp = comparator(&un);
        let pos = string_attr("Цвет", "Красный", None);
        let cand = string_attr("Цвет", "красный", None);
        assert!(cmp.compare_strings_lemma(&pos, &cand));
    }

    #[test]
    fn string_lemma_rejects_distinct_values_without_lemmatizer() {
        let un = http_client();
        let cmp = comparator(&un);
        let pos = string_attr("Цвет", "Красный", None);
        let cand = string_attr("Цвет", "Синий", Some("синий"));
        assert!(!cmp.compare_strings_lemma(&pos, &cand));
    }
}
