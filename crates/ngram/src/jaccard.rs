//! N-gram construction and Jaccard similarity.

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

/// Builds the set of `n`-grams over `text`'s graphemes. When `padding` is
/// set, `text` is padded with `n - 1` underscores on both ends first, so a
/// short string still yields boundary-sensitive grams.
pub fn create_ngrams(text: &str, n: usize, padding: bool) -> HashSet<String> {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.is_empty() || graphemes.len() < n && !padding {
        return HashSet::new();
    }

    let padded;
    let chars: Vec<&str> = if padding && n > 1 {
        let pad = "_".repeat(n - 1);
        padded = format!("{pad}{text}{pad}");
        padded.graphemes(true).collect()
    } else {
        graphemes
    };

    if chars.len() < n {
        return HashSet::new();
    }

    (0..=chars.len() - n).map(|i| chars[i..i + n].concat()).collect()
}

/// Jaccard similarity between two sets: `1.0` when both are empty, `0.0`
/// when exactly one is empty, `|intersection| / |union|` otherwise.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_no_grams() {
        assert!(create_ngrams("", 2, false).is_empty());
    }

    #[test]
    fn jaccard_of_identical_sets_is_one() {
        let a = create_ngrams("length", 2, false);
        let b = create_ngrams("length", 2, false);
        assert_eq!(jaccard(&a, &b), 1.0);
    }

    #[test]
    fn jaccard_is_symmetric() {
        let a = create_ngrams("длина", 3, true);
        let b = create_ngrams("ширина", 3, true);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }
}
