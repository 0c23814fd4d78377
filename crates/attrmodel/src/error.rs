//! Error type for attribute-model level failures.
//!
//! Per the error policy, nothing in this crate aborts attribute parsing for
//! sibling attributes; this type exists for configuration-time validation
//! (e.g. a malformed grouped-map construction in tests) rather than for
//! propagation out of the parsing functions, which degrade instead of
//! erroring.

#[derive(Debug, thiserror::Error)]
pub enum AttrModelError {
    #[error("invalid range: lower bound {0:?} is greater than upper bound {1:?}")]
    InvalidRange(f64, f64),
}
