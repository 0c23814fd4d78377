//! Local n-gram similarity: a cheap first-pass textual comparator used for
//! boolean-name matching, string-name matching, and multiple-value
//! comparison.
//!
//! [`sim`] sums six Jaccard scores (bigram × 3 encodings + trigram × 3
//! encodings) and returns a value in `[0, 6]` — it is **not** normalized to
//! `[0, 1]`. Every call site compares this sum against an explicit
//! threshold (0.7 for names, 0.85 for multiple-value items).

mod clean;
mod jaccard;

pub use clean::clean_text;
pub use jaccard::{create_ngrams, jaccard};

/// Sums bigram and trigram Jaccard similarity across three encodings each:
/// unpadded-space, unpadded-underscore, padded-underscore. Symmetric in `a`
/// and `b`.
pub fn sim(a: &str, b: &str) -> f64 {
    let a_space = clean_text(a, " ");
    let a_underscore = clean_text(a, "_");
    let b_space = clean_text(b, " ");
    let b_underscore = clean_text(b, "_");

    let mut total = 0.0;
    for n in [2usize, 3] {
        let a_unpadded_space = create_ngrams(&a_space, n, false);
        let b_unpadded_space = create_ngrams(&b_space, n, false);
        total += jaccard(&a_unpadded_space, &b_unpadded_space);

        let a_unpadded_underscore = create_ngrams(&a_underscore, n, false);
        let b_unpadded_underscore = create_ngrams(&b_underscore, n, false);
        total += jaccard(&a_unpadded_underscore, &b_unpadded_underscore);

        let a_padded_underscore = create_ngrams(&a_underscore, n, true);
        let b_padded_underscore = create_ngrams(&b_underscore, n, true);
        total += jaccard(&a_padded_underscore, &b_padded_underscore);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_of_identical_strings_is_maximal() {
        assert_eq!(sim("Съёмная батарея", "Съёмная батарея"), 6.0);
    }

    #[test]
    fn sim_is_symmetric() {
        assert_eq!(sim("Съёмная батарея", "Съёмный аккумулятор"), sim("Съёмный аккумулятор", "Съёмная батарея"));
    }

    #[test]
    fn similar_names_clear_the_name_threshold() {
        assert!(sim("Съёмная батарея", "Съёмный аккумулятор") >= 0.7);
    }

    #[test]
    fn unrelated_strings_score_low() {
        assert!(sim("Длина", "Процессор") < 0.7);
    }
}
