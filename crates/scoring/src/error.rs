//! Error type for the scoring crate. Kept small: almost every failure mode
//! downstream (HTTP, decode) is already absorbed by `clients`' degrade-on-
//! failure clients, so this only covers failures internal to matching
//! itself.

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("candidate scoring task panicked: {0}")]
    TaskPanicked(String),
}
