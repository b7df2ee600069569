//! Word-order-insensitive similarity scoring.
//!
//! Disease labels often carry the same qualifiers in a different order
//! ("fever with joint pain" vs "joint pain with fever"), so candidates are
//! compared after sorting their tokens. The underlying ratio is rapidfuzz's
//! normalized Indel similarity.

use rapidfuzz::fuzz;

/// Highest possible score.
pub const MAX_SCORE: f64 = 100.0;

/// Token-sort similarity of two normalized strings, in `[0, 100]`.
///
/// Both inputs are split on whitespace, the tokens sorted and re-joined,
/// then compared with [`fuzz::ratio`]. Blank input scores 0.
pub fn token_sort_ratio(left: &str, right: &str) -> f64 {
    let left = sorted_tokens(left);
    let right = sorted_tokens(right);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let similarity = fuzz::ratio(left.chars(), right.chars());
    (similarity * MAX_SCORE).clamp(0.0, MAX_SCORE)
}

fn sorted_tokens(text: &str) -> String {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reordered_tokens_score_full() {
        let score = token_sort_ratio("joint pain fever", "fever joint pain");
        assert!((score - MAX_SCORE).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn unrelated_text_scores_low() {
        let score = token_sort_ratio("joint pain fever", "chronic skin ulcer");
        assert!(score < 60.0, "got {score}");
    }

    #[test]
    fn blank_input_scores_zero() {
        assert_eq!(token_sort_ratio("", "fever"), 0.0);
        assert_eq!(token_sort_ratio("fever", "   "), 0.0);
    }

    #[test]
    fn near_miss_scores_high() {
        let score = token_sort_ratio("feverr", "fever");
        assert!(score > 85.0, "got {score}");
        assert!(score < MAX_SCORE);
    }
}
