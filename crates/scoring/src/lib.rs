//! Cross-type value comparison, per-candidate scoring, and semaphore-bounded
//! position matching.
//!
//! # Overview
//!
//! - [`compare::ValueComparator`] — the 5×5 typed-value dispatch table.
//! - [`scorer::CandidateScorer`] — walks one candidate against a position's
//!   parsed attributes, with the early-exit optimization.
//! - [`position_matcher::PositionMatcher`] — fans a position out across every
//!   retrieved candidate under a shared semaphore and sorts the survivors.
//! - [`lemma::Lemmatizer`] — the optional pluggable lemma/stem capability
//!   `compareStringsLemma` falls back from.

pub mod compare;
pub mod error;
pub mod lemma;
pub mod position_matcher;
pub mod scorer;

pub use compare::{ComparatorConfig, ValueComparator};
pub use error::ScoringError;
pub use lemma::Lemmatizer;
pub use position_matcher::{PositionMatcher, PositionMatcherConfig};
pub use scorer::{min_required_points, CandidateScore, CandidateScorer, MatchedAttribute, UnmatchedAttribute};
