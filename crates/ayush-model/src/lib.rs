//! Data model for AYUSH disease code lookup.

pub mod discipline;
pub mod error;
pub mod resolution;
pub mod table;

pub use discipline::{
    Discipline, SIDDHA_CODE_COLUMN, TableSchema, UNANI_CODE_COLUMN, UnknownDiscipline,
};
pub use error::{LookupError, Result};
pub use resolution::{
    ConfirmedMatch, DEFAULT_THRESHOLD, DEFAULT_TOP_K, MatchCandidate, MatchKind, NO_MATCH_MESSAGE,
    PreparedRow, PreparedTable, ResolveOptions, Resolution, SUGGESTIONS_MESSAGE,
};
pub use table::{RawTable, Record};
