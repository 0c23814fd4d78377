//! Lemmatization is downstream of string-value comparison and optional: an
//! injected capability rather than a hard dependency, per the design notes.
//! When absent, `compareStringsLemma` falls back to case-insensitive
//! trimmed equality.

/// A pluggable lemmatizer/stemmer. No implementation ships with this
/// service — model hosting is a non-goal — so in practice this is either
/// absent or backed by a caller-supplied adapter over an external service.
pub trait Lemmatizer: Send + Sync {
    /// Returns the lemma for `word`, or `None` if it cannot be determined.
    fn lemmatize(&self, word: &str) -> Option<String>;

    /// Returns the stem for `word`, used as a fallback when no lemma is
    /// available.
    fn stem(&self, word: &str) -> Option<String> {
        let _ = word;
        None
    }
}

/// Trivial fallback used when no lemmatizer capability is configured:
/// case-insensitive, trimmed equality, as the design notes specify.
pub fn equal_ignoring_case(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim()) || a.trim().to_lowercase() == b.trim().to_lowercase()
}
