use thiserror::Error;
use vndb_model::ModelError;

/// Failure of a single request/response round trip.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

impl From<ModelError> for ProviderError {
    fn from(err: ModelError) -> Self {
        ProviderError::ContractViolation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
