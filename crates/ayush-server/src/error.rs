use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ayush_fhir::FhirError;
use ayush_history::HistoryError;
use ayush_model::LookupError;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Fhir(#[from] FhirError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Lookup(LookupError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            ServerError::Lookup(LookupError::Schema { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Fhir(FhirError::InvalidResource { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServerError::Fhir(FhirError::UnsupportedBundle(_) | FhirError::UnsupportedResource { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::History(HistoryError::DuplicateUsername { .. }) => StatusCode::CONFLICT,
            ServerError::History(HistoryError::UserNotFound) => StatusCode::NOT_FOUND,
            ServerError::History(HistoryError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ServerError::Fhir(FhirError::Serialize(_))
            | ServerError::History(
                HistoryError::Io { .. } | HistoryError::Json { .. } | HistoryError::Poisoned,
            )
            | ServerError::Task(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Lookup(LookupError::InvalidInput { .. }) => "INVALID_INPUT",
            ServerError::Lookup(LookupError::Schema { .. }) => "SCHEMA_ERROR",
            ServerError::Fhir(FhirError::InvalidResource { .. }) => "INVALID_RESOURCE",
            ServerError::Fhir(FhirError::UnsupportedResource { .. }) => "UNSUPPORTED_RESOURCE",
            ServerError::Fhir(FhirError::UnsupportedBundle(_)) => "UNSUPPORTED_BUNDLE",
            ServerError::History(HistoryError::DuplicateUsername { .. }) => "CONFLICT",
            ServerError::History(HistoryError::UserNotFound) | ServerError::NotFound => "NOT_FOUND",
            ServerError::History(HistoryError::InvalidInput(_)) => "INVALID_INPUT",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::Fhir(FhirError::Serialize(_))
            | ServerError::History(_)
            | ServerError::Task(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_errors_are_client_errors() {
        let err = ServerError::from(LookupError::invalid_input("disease_text is required"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "disease_text is required");

        let err = ServerError::from(LookupError::schema("Siddha", &["namc_code"]));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn duplicate_user_is_conflict() {
        let err = ServerError::from(HistoryError::DuplicateUsername {
            username: "arun".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "CONFLICT");
    }
}
