//! Classification systems a code can belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Merged-table column holding Siddha codes.
pub const SIDDHA_CODE_COLUMN: &str = "siddha_code";
/// Merged-table column holding Unani codes.
pub const UNANI_CODE_COLUMN: &str = "unani_code";

/// One of the two classification systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Discipline {
    Siddha,
    Unani,
}

impl Discipline {
    pub const ALL: [Discipline; 2] = [Discipline::Siddha, Discipline::Unani];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Siddha => "Siddha",
            Self::Unani => "Unani",
        }
    }

    /// Column names this discipline's source table is read from.
    pub fn schema(self) -> TableSchema {
        match self {
            Self::Siddha => TableSchema {
                code_columns: &["namc_code"],
                text_columns: &["short_definition", "namc_term"],
            },
            Self::Unani => TableSchema {
                code_columns: &["numc_code"],
                text_columns: &["short_definition", "numc_term"],
            },
        }
    }

    /// Merged-table column cross-referencing this discipline's codes.
    pub fn merged_code_column(self) -> &'static str {
        match self {
            Self::Siddha => SIDDHA_CODE_COLUMN,
            Self::Unani => UNANI_CODE_COLUMN,
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a discipline name that is neither Siddha nor Unani.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown discipline: {0}")]
pub struct UnknownDiscipline(pub String);

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("siddha") {
            Ok(Self::Siddha)
        } else if trimmed.eq_ignore_ascii_case("unani") {
            Ok(Self::Unani)
        } else {
            Err(UnknownDiscipline(trimmed.to_string()))
        }
    }
}

/// Candidate column names for a discipline table, in preference order.
///
/// Names are already in normalized header form (lower snake case).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub code_columns: &'static [&'static str],
    pub text_columns: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("SIDDHA".parse::<Discipline>(), Ok(Discipline::Siddha));
        assert_eq!(" unani ".parse::<Discipline>(), Ok(Discipline::Unani));
        assert!("ayurveda".parse::<Discipline>().is_err());
    }

    #[test]
    fn short_definition_is_preferred() {
        for discipline in Discipline::ALL {
            assert_eq!(discipline.schema().text_columns[0], "short_definition");
        }
    }
}
