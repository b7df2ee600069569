//! Query resolution: exact, then partial, then fuzzy suggestions.

use ayush_model::{
    ConfirmedMatch, Discipline, LookupError, MatchCandidate, MatchKind, PreparedRow,
    PreparedTable, RawTable, ResolveOptions, Resolution, Result,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::crossref::{MergedTable, resolve_merged};
use crate::matcher::{SearchSpace, find_exact, find_fuzzy, find_partial};
use crate::normalize::normalize_str;
use crate::prepare::prepare_discipline;

/// Resolve `raw_query` against freshly prepared discipline tables.
///
/// Both tables are prepared on every call; use [`LookupContext`] to prepare
/// once and resolve many times.
///
/// # Errors
///
/// [`LookupError::InvalidInput`] for a blank query or out-of-range options,
/// [`LookupError::Schema`] when a discipline table lacks required columns.
pub fn resolve(
    raw_query: &str,
    siddha: &RawTable,
    unani: &RawTable,
    merged: &MergedTable,
    options: &ResolveOptions,
) -> Result<Resolution> {
    let query = validate_query(raw_query, options)?;
    let space = SearchSpace::new([
        prepare_discipline(siddha, Discipline::Siddha)?,
        prepare_discipline(unani, Discipline::Unani)?,
    ]);
    Ok(resolve_in(&space, merged, &query, options))
}

/// Resolve an already-normalized query over a prepared search space.
///
/// Exact and partial matches are confirmed and enriched with the merged
/// record; fuzzy candidates are returned as suggestions without it.
pub fn resolve_in(
    space: &SearchSpace,
    merged: &MergedTable,
    query: &str,
    options: &ResolveOptions,
) -> Resolution {
    if let Some(row) = find_exact(space, query) {
        debug!(tier = "exact", code = %row.code, discipline = %row.discipline, "query resolved");
        return confirm(row, merged, MatchKind::Exact);
    }

    if let Some(row) = find_partial(space, query) {
        debug!(tier = "partial", code = %row.code, discipline = %row.discipline, "query resolved");
        return confirm(row, merged, MatchKind::Partial);
    }

    let suggestions: Vec<MatchCandidate> = find_fuzzy(space, query, options.top_k, options.threshold)
        .into_iter()
        .filter_map(|hit| {
            space.get(hit.index).map(|row| MatchCandidate {
                discipline: row.discipline,
                code: row.code.clone(),
                label: row.label.clone(),
                score: Some(hit.score),
            })
        })
        .collect();

    if suggestions.is_empty() {
        debug!(rows = space.len(), "no match");
        Resolution::no_match()
    } else {
        debug!(tier = "fuzzy", count = suggestions.len(), "returning suggestions");
        Resolution::suggestions(suggestions)
    }
}

fn confirm(row: &PreparedRow, merged: &MergedTable, matched_by: MatchKind) -> Resolution {
    Resolution::Matched(ConfirmedMatch {
        discipline: row.discipline,
        code: row.code.clone(),
        label: row.label.clone(),
        matched_by,
        merged: resolve_merged(merged, row.discipline, &row.code),
    })
}

/// Check options and return the normalized query.
fn validate_query(raw_query: &str, options: &ResolveOptions) -> Result<String> {
    if raw_query.trim().is_empty() {
        return Err(LookupError::invalid_input("disease_text is required"));
    }
    options.validate()?;
    let query = normalize_str(raw_query);
    if query.is_empty() {
        return Err(LookupError::invalid_input(
            "disease_text has no searchable characters",
        ));
    }
    Ok(query)
}

/// What to do when a discipline table fails schema checks at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaPolicy {
    /// Refuse to build the context.
    #[default]
    Strict,
    /// Log the failure and search the remaining tables.
    Degrade,
}

/// Load outcome of one discipline table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub discipline: Discipline,
    pub source_rows: usize,
    pub prepared_rows: usize,
    pub dropped_rows: usize,
    /// Column labels were read from; `None` when the table was unusable.
    pub text_source: Option<String>,
    /// Schema failure that took the table out of the search space.
    pub error: Option<String>,
}

/// Prepared tables held for the lifetime of a table load.
///
/// Built once, then shared read-only; resolution never mutates it.
#[derive(Debug, Clone, Default)]
pub struct LookupContext {
    space: SearchSpace,
    merged: MergedTable,
    summaries: Vec<TableSummary>,
}

impl LookupContext {
    /// Prepare the discipline tables and wrap the merged table.
    ///
    /// # Errors
    ///
    /// Under [`SchemaPolicy::Strict`], the first table failing its schema
    /// check. Under [`SchemaPolicy::Degrade`] the failing table is left out
    /// and recorded in [`LookupContext::summaries`].
    pub fn new(
        siddha: &RawTable,
        unani: &RawTable,
        merged: MergedTable,
        policy: SchemaPolicy,
    ) -> Result<Self> {
        let mut tables = Vec::with_capacity(Discipline::ALL.len());
        let mut summaries = Vec::with_capacity(Discipline::ALL.len());

        for (discipline, raw) in [(Discipline::Siddha, siddha), (Discipline::Unani, unani)] {
            match prepare_discipline(raw, discipline) {
                Ok(table) => {
                    summaries.push(summary(&table, raw));
                    tables.push(table);
                }
                Err(err) if policy == SchemaPolicy::Degrade => {
                    warn!(discipline = %discipline, error = %err, "table excluded from search");
                    summaries.push(TableSummary {
                        discipline,
                        source_rows: raw.len(),
                        prepared_rows: 0,
                        dropped_rows: 0,
                        text_source: None,
                        error: Some(err.to_string()),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        let space = SearchSpace::new(tables);
        info!(
            searchable_rows = space.len(),
            merged_rows = merged.len(),
            "lookup tables ready"
        );

        Ok(Self {
            space,
            merged,
            summaries,
        })
    }

    /// Resolve `raw_query` over the cached search space.
    ///
    /// # Errors
    ///
    /// [`LookupError::InvalidInput`] for a blank query or out-of-range options.
    pub fn resolve(&self, raw_query: &str, options: &ResolveOptions) -> Result<Resolution> {
        let query = validate_query(raw_query, options)?;
        Ok(resolve_in(&self.space, &self.merged, &query, options))
    }

    pub fn search_space(&self) -> &SearchSpace {
        &self.space
    }

    pub fn merged(&self) -> &MergedTable {
        &self.merged
    }

    pub fn summaries(&self) -> &[TableSummary] {
        &self.summaries
    }
}

fn summary(table: &PreparedTable, raw: &RawTable) -> TableSummary {
    let absent = raw.headers.is_empty();
    TableSummary {
        discipline: table.discipline,
        source_rows: raw.len(),
        prepared_rows: table.len(),
        dropped_rows: table.dropped,
        text_source: (!absent).then(|| table.text_source.clone()),
        error: None,
    }
}
