use thiserror::Error;

/// Errors from building or validating FHIR bundles.
#[derive(Debug, Error)]
pub enum FhirError {
    /// The request is not a bundle this service processes.
    #[error("unsupported bundle: {0}")]
    UnsupportedBundle(String),

    /// An entry carries a resource type outside Patient/Observation/Condition.
    #[error("Unsupported resource type: {resource_type}")]
    UnsupportedResource { resource_type: String },

    /// A resource failed structural or value checks.
    #[error("Invalid {resource_type} resource: {message}")]
    InvalidResource {
        resource_type: String,
        message: String,
    },

    #[error("failed to serialize resource: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FhirError {
    pub(crate) fn invalid(resource_type: &str, message: impl Into<String>) -> Self {
        Self::InvalidResource {
            resource_type: resource_type.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FhirError>;
