//! Error bodies returned by the HTTP surface

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, DomainError};

/// Message sent for every unclassified failure; the cause is only logged
pub const OPAQUE_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// JSON error body: `{"message": ..., "field": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                field: None,
            },
        }
    }

    /// Attach the offending input field
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.body.field = Some(field.into());
        self
    }

    /// Opaque internal error
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, OPAQUE_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation { field, message } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message).with_field(field)
            }
            AuthError::Authentication { field, message } => {
                Self::new(StatusCode::UNAUTHORIZED, message).with_field(field)
            }
            AuthError::Unclassified { message } => {
                tracing::error!(error = %message, "Unclassified error while handling request");
                Self::internal()
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        AuthError::from(err).into()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body.field {
            Some(field) => write!(f, "{} ({}): {}", self.status, field, self.body.message),
            None => write!(f, "{}: {}", self.status, self.body.message),
        }
    }
}

impl std::error::Error for ApiError {}
