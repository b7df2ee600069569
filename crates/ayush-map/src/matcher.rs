//! Tiered matching primitives over a unified search space.

use std::cmp::Ordering;

use ayush_model::{PreparedRow, PreparedTable};

use crate::score::token_sort_ratio;

/// All prepared rows of every discipline, concatenated in table order.
///
/// Positions are stable for the lifetime of the space, so fuzzy hits can
/// refer back to rows by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSpace {
    rows: Vec<PreparedRow>,
}

impl SearchSpace {
    pub fn new<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = PreparedTable>,
    {
        let rows = tables.into_iter().flat_map(|table| table.rows).collect();
        Self { rows }
    }

    pub fn from_rows(rows: Vec<PreparedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PreparedRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&PreparedRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A fuzzy-ranked candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyHit {
    /// Normalized text that was scored.
    pub text: String,
    /// Similarity in `[0, 100]`.
    pub score: f64,
    /// Position in the search space.
    pub index: usize,
}

/// First row whose normalized text equals `query`.
pub fn find_exact<'a>(space: &'a SearchSpace, query: &str) -> Option<&'a PreparedRow> {
    space.rows.iter().find(|row| row.normalized_text == query)
}

/// First row whose normalized text contains `query`.
pub fn find_partial<'a>(space: &'a SearchSpace, query: &str) -> Option<&'a PreparedRow> {
    space
        .rows
        .iter()
        .find(|row| row.normalized_text.contains(query))
}

/// Up to `top_k` rows scoring at least `threshold`, best first.
///
/// Equal scores keep search-space order. An empty space yields no hits.
pub fn find_fuzzy(space: &SearchSpace, query: &str, top_k: usize, threshold: f64) -> Vec<FuzzyHit> {
    if top_k == 0 {
        return Vec::new();
    }

    let mut hits: Vec<FuzzyHit> = space
        .rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let score = token_sort_ratio(query, &row.normalized_text);
            (score >= threshold).then(|| FuzzyHit {
                text: row.normalized_text.clone(),
                score,
                index,
            })
        })
        .collect();

    // Stable sort: ties stay in row order.
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits.truncate(top_k);
    hits
}
