//! Per-candidate scoring: walks a position's parsed attributes against one
//! candidate's grouped attributes, per §4.5.

use attrmodel::{GroupedAttributes, ParsedAttribute, TypeTag};
use clients::SemanticMatcherClient;

use crate::compare::ValueComparator;

/// Minimum batched name score for a value-matching candidate attribute to
/// count as the real match (`THRESHOLD_ATTRIBUTE_MATCH`).
pub const NAME_MATCH_THRESHOLD: f64 = 0.73;

#[derive(Debug, Clone)]
pub struct MatchedAttribute {
    pub position_attr_id: Option<i64>,
    pub position_name: String,
    pub position_value: String,
    pub position_unit: Option<String>,
    pub candidate_name: String,
    pub candidate_value: String,
    pub candidate_unit: Option<String>,
    pub name_score: f64,
}

#[derive(Debug, Clone)]
pub struct UnmatchedAttribute {
    pub position_attr_id: Option<i64>,
    pub position_name: String,
    pub position_value: String,
}

#[derive(Debug, Clone)]
pub struct CandidateScore {
    pub candidate_id: i64,
    pub points: usize,
    pub matched: Vec<MatchedAttribute>,
    pub unmatched: Vec<UnmatchedAttribute>,
}

/// The groups of candidate type tags a position attribute of a given type
/// tag may compare against, per §4.5 step 1.
fn compatible_groups(position_tag: TypeTag) -> &'static [TypeTag] {
    use TypeTag::*;
    match position_tag {
        Numeric => &[Range, Numeric],
        Range => &[Numeric, Range],
        String => &[Multiple, Boolean, String],
        Multiple => &[String, Boolean, Multiple],
        Boolean => &[String, Multiple, Boolean],
        Unknown => &[],
    }
}

pub struct CandidateScorer<'a> {
    pub comparator: ValueComparator<'a>,
    pub semantic_matcher: &'a SemanticMatcherClient,
}

impl<'a> CandidateScorer<'a> {
    pub fn new(comparator: ValueComparator<'a>, semantic_matcher: &'a SemanticMatcherClient) -> Self {
        Self { comparator, semantic_matcher }
    }

    /// Scores one candidate against `position_attrs`. Returns `None` when
    /// the early exit fires or the final point total falls short of
    /// `min_required`.
    pub async fn score(
        &self,
        candidate_id: i64,
        position_attrs: &[ParsedAttribute],
        candidate_attrs: &GroupedAttributes,
        min_required: usize,
    ) -> Option<CandidateScore> {
        let total = position_attrs.len();
        let mut points: usize = 0;
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();

        for (i, pos_attr) in position_attrs.iter().enumerate() {
            let remaining = total - i;
            if points + remaining < min_required {
                return None;
            }

            match self.match_one(pos_attr, candidate_attrs).await {
                Some(m) => {
                    points += 1;
                    matched.push(m);
                }
                None => unmatched.push(UnmatchedAttribute {
                    position_attr_id: pos_attr.position_attr_id,
                    position_name: pos_attr.canonical_name.clone(),
                    position_value: pos_attr.original_value.clone(),
                }),
            }
        }

        if points < min_required {
            return None;
        }

        Some(CandidateScore { candidate_id, points, matched, unmatched })
    }

    /// §4.5 steps 1-6 for a single position attribute.
    async fn match_one(&self, pos_attr: &ParsedAttribute, candidate_attrs: &GroupedAttributes) -> Option<MatchedAttribute> {
        let groups = compatible_groups(pos_attr.type_tag);
        if groups.is_empty() {
            return None;
        }

        let mut value_matches = Vec::new();
        for &tag in groups {
            for cand_attr in candidate_attrs.get(tag) {
                if self.comparator.compare(pos_attr, cand_attr).await {
                    value_matches.push(cand_attr);
                }
            }
        }

        if value_matches.is_empty() {
            return None;
        }

        let pairs: Vec<(String, String)> = value_matches
            .iter()
            .map(|c| (pos_attr.canonical_name.clone(), c.canonical_name.clone()))
            .collect();
        let scores = self.semantic_matcher.compare_batch(&pairs).await;

        let (best_idx, best_score) = scores
            .iter()
            .enumerate()
            .fold((0usize, f64::MIN), |acc, (i, &s)| if s > acc.1 { (i, s) } else { acc });

        if best_score < NAME_MATCH_THRESHOLD {
            return None;
        }

        let best = value_matches[best_idx];
        Some(MatchedAttribute {
            position_attr_id: pos_attr.position_attr_id,
            position_name: pos_attr.original_name.clone(),
            position_value: pos_attr.original_value.clone(),
            position_unit: pos_attr.original_unit.clone(),
            candidate_name: best.original_name.clone(),
            candidate_value: best.original_value.clone(),
            candidate_unit: best.original_unit.clone(),
            name_score: best_score,
        })
    }
}

/// `minRequired = floor(positionAttributeCount * ratio)`.
pub fn min_required_points(position_attribute_count: usize, ratio: f64) -> usize {
    ((position_attribute_count as f64) * ratio).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_required_rounds_down() {
        assert_eq!(min_required_points(5, 0.7), 3);
        assert_eq!(min_required_points(10, 0.7), 7);
        assert_eq!(min_required_points(0, 0.7), 0);
    }

    #[test]
    fn compatible_groups_cover_numeric_and_range() {
        assert_eq!(compatible_groups(TypeTag::Numeric), &[TypeTag::Range, TypeTag::Numeric]);
        assert_eq!(compatible_groups(TypeTag::Range), &[TypeTag::Numeric, TypeTag::Range]);
    }

    #[test]
    fn unknown_position_tag_has_no_compatible_group() {
        assert!(compatible_groups(TypeTag::Unknown).is_empty());
    }
}
