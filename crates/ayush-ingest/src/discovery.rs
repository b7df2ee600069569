//! Locating and loading the three source tables.

use std::path::{Path, PathBuf};

use ayush_model::RawTable;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::csv_table::read_raw_table;
use crate::error::{IngestError, Result};

/// File names of the source tables, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    pub siddha: PathBuf,
    pub unani: PathBuf,
    pub merged: PathBuf,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            siddha: PathBuf::from("siddha.csv"),
            unani: PathBuf::from("unani.csv"),
            merged: PathBuf::from("merged.csv"),
        }
    }
}

/// The raw source tables; absent files load as empty tables.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub siddha: RawTable,
    pub unani: RawTable,
    pub merged: RawTable,
}

/// Load all source tables from `dir`.
///
/// A missing file is logged and replaced by an empty table so the service
/// can start with whatever data is present.
///
/// # Errors
///
/// When `dir` is not a directory, or a present file cannot be read or parsed.
pub fn load_tables(dir: &Path, files: &TableFiles) -> Result<SourceTables> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    Ok(SourceTables {
        siddha: load_optional(&dir.join(&files.siddha), "siddha")?,
        unani: load_optional(&dir.join(&files.unani), "unani")?,
        merged: load_optional(&dir.join(&files.merged), "merged")?,
    })
}

fn load_optional(path: &Path, role: &str) -> Result<RawTable> {
    if !path.is_file() {
        warn!(role, path = %path.display(), "data file not found, using empty table");
        return Ok(RawTable::empty());
    }
    let table = read_raw_table(path)?;
    info!(role, path = %path.display(), rows = table.len(), "data file loaded");
    Ok(table)
}
