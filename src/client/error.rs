//! Client-side errors

use crate::domain::ValidationErrors;
use thiserror::Error;

/// Message shown when no response came back
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Failure of a client call or form submission
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Network error. Please try again.")]
    Network(String),

    /// The server answered with a non-success status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Rejected locally before anything was sent
    #[error("{0}")]
    Validation(ValidationErrors),

    /// A submission from this form is still in flight
    #[error("A submission is already in progress")]
    AlreadySubmitting,
}

/// Result of a client call
pub type ClientResult<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation(errors)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ClientError::Network("connection refused".to_string()).to_string(),
            NETWORK_ERROR_MESSAGE
        );
        let server = ClientError::Server {
            status: 400,
            message: "A record with mrn 'M1' already exists".to_string(),
        };
        assert_eq!(server.to_string(), "A record with mrn 'M1' already exists");
        assert_eq!(server.status(), Some(400));
        assert_eq!(ClientError::AlreadySubmitting.status(), None);
    }
}
