//! Prepared rows, match candidates and the resolution result.

use serde::{Deserialize, Serialize};

use crate::discipline::Discipline;
use crate::error::{LookupError, Result};
use crate::table::Record;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_THRESHOLD: f64 = 85.0;

/// Message returned alongside fuzzy suggestions.
pub const SUGGESTIONS_MESSAGE: &str = "No exact/partial match; showing fuzzy suggestions";
/// Message returned when nothing matched at all.
pub const NO_MATCH_MESSAGE: &str = "No match found in Siddha or Unani.";

/// One searchable row of a discipline table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRow {
    pub discipline: Discipline,
    /// Trimmed code string.
    pub code: String,
    /// Label text as it appeared in the source.
    pub label: String,
    /// Never empty.
    pub normalized_text: String,
    /// Index of the row in the source table.
    pub source_row: usize,
}

/// A discipline table reduced to its searchable rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTable {
    pub discipline: Discipline,
    /// Column the codes were read from.
    pub code_column: String,
    /// Column the labels were read from.
    pub text_source: String,
    pub rows: Vec<PreparedRow>,
    /// Source rows excluded for having no usable label.
    pub dropped: usize,
}

impl PreparedTable {
    pub fn empty(discipline: Discipline) -> Self {
        let schema = discipline.schema();
        Self {
            discipline,
            code_column: schema.code_columns[0].to_string(),
            text_source: schema.text_columns[0].to_string(),
            rows: Vec::new(),
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Which tier produced a confirmed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Partial,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Partial => "partial",
        }
    }
}

/// A ranked alternative offered when no exact or partial match exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub discipline: Discipline,
    pub code: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// A match the resolver is confident in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedMatch {
    pub discipline: Discipline,
    pub code: String,
    pub label: String,
    pub matched_by: MatchKind,
    /// Cross-referenced merged-table row, when one exists.
    pub merged: Option<Record>,
}

/// Outcome of resolving one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolution {
    Matched(ConfirmedMatch),
    Suggestions {
        error: String,
        suggestions: Vec<MatchCandidate>,
    },
    NoMatch {
        error: String,
    },
}

impl Resolution {
    pub fn suggestions(suggestions: Vec<MatchCandidate>) -> Self {
        Self::Suggestions {
            error: SUGGESTIONS_MESSAGE.to_string(),
            suggestions,
        }
    }

    pub fn no_match() -> Self {
        Self::NoMatch {
            error: NO_MATCH_MESSAGE.to_string(),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn confirmed(&self) -> Option<&ConfirmedMatch> {
        match self {
            Self::Matched(confirmed) => Some(confirmed),
            _ => None,
        }
    }

    /// Fuzzy suggestions; empty for confirmed and no-match results.
    pub fn candidates(&self) -> &[MatchCandidate] {
        match self {
            Self::Suggestions { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Matched(_) => None,
            Self::Suggestions { error, .. } | Self::NoMatch { error } => Some(error),
        }
    }
}

/// Fuzzy tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Maximum number of fuzzy suggestions.
    pub top_k: usize,
    /// Minimum similarity score (0 to 100, inclusive) for a suggestion.
    pub threshold: f64,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ResolveOptions {
    pub fn new(top_k: usize, threshold: f64) -> Self {
        Self { top_k, threshold }
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(LookupError::invalid_input("top_k must be at least 1"));
        }
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(LookupError::invalid_input(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
