use thiserror::Error;

/// Errors raised by table preparation and query validation.
///
/// "No disease found" is not an error; it is a [`crate::Resolution`] value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The query or tuning options were unusable.
    #[error("{message}")]
    InvalidInput { message: String },

    /// A source table lacks every candidate for a required column.
    #[error("{table} table is missing a required column (expected one of: {})", expected.join(", "))]
    Schema {
        table: String,
        expected: Vec<String>,
    },
}

impl LookupError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn schema(table: impl Into<String>, expected: &[&str]) -> Self {
        Self::Schema {
            table: table.into(),
            expected: expected.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
