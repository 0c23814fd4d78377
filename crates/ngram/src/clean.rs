//! Text cleanup step shared by every n-gram encoding: lowercase, drop
//! everything but letters/digits/whitespace, collapse whitespace, trim.

use unicode_segmentation::UnicodeSegmentation;

/// Cleans `text` and replaces runs of whitespace with a single `separator`.
/// An empty separator reproduces the "unpadded-space" form when `separator`
/// is `" "`, or the squashed-together form when it is `""`.
pub fn clean_text(text: &str, separator: &str) -> String {
    let filtered: String = text
        .graphemes(true)
        .filter(|g| g.chars().all(|c| c.is_alphanumeric() || c.is_whitespace()))
        .collect();

    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase().replace(' ', separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(clean_text("  Длина,  см!!  ", " "), "длина см");
    }

    #[test]
    fn underscore_separator() {
        assert_eq!(clean_text("Съёмная батарея", "_"), "съёмная_батарея");
    }
}
