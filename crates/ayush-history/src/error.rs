use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("username '{username}' is already taken")]
    DuplicateUsername { username: String },

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("failed to access history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("history store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, HistoryError>;
