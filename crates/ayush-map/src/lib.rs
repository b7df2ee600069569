//! Disease-name resolution over Siddha and Unani code tables.
//!
//! Queries are normalized, then matched exactly, by substring, and finally
//! ranked by token-sort similarity. Confirmed matches are cross-referenced
//! against the merged dataset.

#![deny(unsafe_code)]

pub mod crossref;
pub mod matcher;
pub mod normalize;
pub mod prepare;
pub mod resolve;
pub mod score;

pub use crossref::{MergedTable, resolve_merged};
pub use matcher::{FuzzyHit, SearchSpace, find_exact, find_fuzzy, find_partial};
pub use normalize::{normalize, normalize_header, normalize_str};
pub use prepare::{prepare, prepare_discipline};
pub use resolve::{LookupContext, SchemaPolicy, TableSummary, resolve, resolve_in};
pub use score::{MAX_SCORE, token_sort_ratio};
