use serde::{Deserialize, Serialize};

/// Message shown to the operator for any failure that carries no server text.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";

/// Body returned by the backend when it rejects a new lead
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend rejected the payload with a 400 and a readable message.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(u16),

    /// A success status other than the one the endpoint acknowledges with.
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Text suitable for showing to the operator.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        ClientError::InvalidInput(err.to_string())
    }
}
