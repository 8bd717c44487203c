//! Approximate identifier comparison.
//!
//! OCR output drifts between frames ("Player1" / "PIayer1" / "player1 "), so
//! identifiers are never compared exactly. The score is a 0–100 ratio over
//! Levenshtein distance on case-folded, trimmed text.

/// Default threshold: two identifiers are the same row only if their score
/// is strictly greater than this.
pub const SIMILARITY_THRESHOLD: u8 = 80;

/// Similarity of two identifiers on a 0–100 scale, rounded half-up.
///
/// `100 * (longest - distance) / longest`, where `longest` is the character
/// count of the longer normalized input. Two empty inputs score 100.
pub fn similarity(lhs: &str, rhs: &str) -> u8 {
    let lhs = normalize(lhs);
    let rhs = normalize(rhs);

    let longest = lhs.chars().count().max(rhs.chars().count());
    if longest == 0 {
        return 100;
    }

    let distance = strsim::levenshtein(&lhs, &rhs).min(longest);
    let kept = longest - distance;

    // Integer rounding keeps the threshold edge exact (no float drift at 80).
    let score = (200 * kept + longest) / (2 * longest);
    score.min(100) as u8
}

/// `true` if `similarity(lhs, rhs) > threshold`.
pub fn is_similar(lhs: &str, rhs: &str, threshold: u8) -> bool {
    similarity(lhs, rhs) > threshold
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_full_score() {
        assert_eq!(similarity("Ghost#1234", "Ghost#1234"), 100);
    }

    #[test]
    fn case_and_padding_are_ignored() {
        assert_eq!(similarity("  GHOST ", "ghost"), 100);
    }

    #[test]
    fn disjoint_single_chars_score_zero() {
        assert_eq!(similarity("5", "6"), 0);
    }

    #[test]
    fn one_edit_in_twenty_scores_95() {
        assert_eq!(
            similarity("55555555555555555555", "55555555555555555556"),
            95
        );
    }

    #[test]
    fn score_is_symmetric() {
        assert_eq!(similarity("kitten", "sitting"), similarity("sitting", "kitten"));
    }
}
