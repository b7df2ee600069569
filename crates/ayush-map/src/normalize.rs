//! Text canonicalization for label and query comparison.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Upper bound on fold passes; real text settles after one or two.
const MAX_FOLD_PASSES: usize = 4;

/// Canonical comparison form of an optional cell or query.
///
/// `None` and blank input give an empty string.
pub fn normalize(text: Option<&str>) -> String {
    text.map(normalize_str).unwrap_or_default()
}

/// Canonical comparison form of `text`.
///
/// Lower-cases, applies compatibility decomposition (NFKD), drops combining
/// marks and collapses whitespace runs to one space:
///
/// - "  Fièvre   Aiguë " → "fievre aigue"
/// - "ＦＥＶＥＲ" → "fever"
///
/// The result is a fixed point: `normalize_str(&normalize_str(x)) == normalize_str(x)`.
pub fn normalize_str(text: &str) -> String {
    let mut current = fold(text);
    // Case mapping can expose new decompositions (U+0130 lower-cases to i + U+0307).
    for _ in 0..MAX_FOLD_PASSES {
        let next = fold(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical column name: trimmed, lower-cased, whitespace runs as `_`.
///
/// "NAMC CODE" → "namc_code", " Short  Definition" → "short_definition".
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
