//! HTTP error mapping
//!
//! | Error | Status |
//! |---|---|
//! | Validation, malformed body | 400 |
//! | Authentication | 401 |
//! | NotFound | 404 |
//! | anything else | 500, detail logged only |

use crate::api::responses::ErrorBody;
use crate::domain::ShiftSyncError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// Failure from the record layer
    Record(ShiftSyncError),
    /// The request body could not be read as the expected JSON
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Record(err) => match err {
                ShiftSyncError::Validation(_) => StatusCode::BAD_REQUEST,
                ShiftSyncError::NotFound { .. } => StatusCode::NOT_FOUND,
                ShiftSyncError::Authentication(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::BadRequest(message) => ErrorBody::new(message.clone()),
            ApiError::Record(ShiftSyncError::Validation(errors)) => ErrorBody {
                message: errors.to_string(),
                errors: Some(errors.errors().to_vec()),
            },
            ApiError::Record(ShiftSyncError::Authentication(message)) => {
                ErrorBody::new(message.clone())
            }
            ApiError::Record(err @ ShiftSyncError::NotFound { .. }) => {
                ErrorBody::new(err.to_string())
            }
            ApiError::Record(_) => ErrorBody::new("Internal server error"),
        }
    }
}

impl From<ShiftSyncError> for ApiError {
    fn from(err: ShiftSyncError) -> Self {
        ApiError::Record(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            if let ApiError::Record(err) = &self {
                tracing::error!(error = %err, "Request failed");
            }
        }
        (status, Json(self.body())).into_response()
    }
}

/// Handler result
pub type ApiResult<T> = std::result::Result<T, ApiError>;
