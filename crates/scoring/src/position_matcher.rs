//! Fans a position out across every retrieved candidate under a shared
//! semaphore, per §4.6.

use std::sync::Arc;

use attrmodel::{GroupedAttributes, ParsedAttribute, Position, ProductCandidate};
use clients::{SemanticMatcherClient, UnitNormalizerClient};
use tokio::sync::Semaphore;

use crate::compare::{ComparatorConfig, ValueComparator};
use crate::error::ScoringError;
use crate::scorer::{min_required_points, CandidateScore, CandidateScorer};

#[derive(Debug, Clone, Copy)]
pub struct PositionMatcherConfig {
    pub comparator: ComparatorConfig,
    /// Shared candidate-scoring task concurrency (`SHRINKER_SEMAPHORE_SIZE`).
    pub semaphore_capacity: usize,
    /// `CANDIDATES_TRASHOLD_SCORE`.
    pub min_required_ratio: f64,
}

impl Default for PositionMatcherConfig {
    fn default() -> Self {
        Self { comparator: ComparatorConfig::default(), semaphore_capacity: 100, min_required_ratio: 0.7 }
    }
}

pub struct PositionMatcher {
    pub config: PositionMatcherConfig,
    pub unit_normalizer: Arc<UnitNormalizerClient>,
    pub semantic_matcher: Arc<SemanticMatcherClient>,
}

impl PositionMatcher {
    pub fn new(
        config: PositionMatcherConfig,
        unit_normalizer: Arc<UnitNormalizerClient>,
        semantic_matcher: Arc<SemanticMatcherClient>,
    ) -> Self {
        Self { config, unit_normalizer, semantic_matcher }
    }

    /// Scores every candidate against `position_attrs`, sorted descending by
    /// points. Returns an empty vec (not an error) when `position_attrs` is
    /// empty — the caller is expected to skip persistence in that case, per
    /// §4.6 step 1.
    pub async fn match_candidates(
        &self,
        position: &Position,
        position_attrs: Vec<ParsedAttribute>,
        candidates: Vec<(ProductCandidate, GroupedAttributes)>,
    ) -> Result<Vec<CandidateScore>, ScoringError> {
        if position_attrs.is_empty() {
            tracing::debug!(position_id = position.id, "no parsed attributes, skipping match");
            return Ok(Vec::new());
        }

        let min_required = min_required_points(position_attrs.len(), self.config.min_required_ratio);
        tracing::info!(
            position_id = position.id,
            candidates = candidates.len(),
            min_required,
            "matching position against candidates"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.semaphore_capacity.max(1)));
        let position_attrs = Arc::new(position_attrs);

        let mut tasks = Vec::with_capacity(candidates.len());
        for (candidate, grouped) in candidates {
            let semaphore = Arc::clone(&semaphore);
            let position_attrs = Arc::clone(&position_attrs);
            let unit_normalizer = Arc::clone(&self.unit_normalizer);
            let semantic_matcher = Arc::clone(&self.semantic_matcher);
            let comparator_config = self.config.comparator;

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore never closed");
                let comparator = ValueComparator::new(comparator_config, unit_normalizer.as_ref());
                let scorer = CandidateScorer::new(comparator, semantic_matcher.as_ref());
                scorer.score(candidate.id, &position_attrs, &grouped, min_required).await
            }));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(Some(score)) => results.push(score),
                Ok(None) => {}
                Err(join_err) => {
                    tracing::warn!(error = %join_err, position_id = position.id, "candidate scoring task failed");
                }
            }
        }

        results.sort_by(|a, b| b.points.cmp(&a.points));
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_semaphore_capacity_matches_config_surface() {
        assert_eq!(PositionMatcherConfig::default().semaphore_capacity, 100);
    }

    #[test]
    fn default_min_required_ratio_matches_config_surface() {
        assert_eq!(PositionMatcherConfig::default().min_required_ratio, 0.7);
    }
}
