//! Centralized error handling.
//!
//! Business-rule failures are tagged with one of three kinds
//! (`INVALID_PASSWORD`, `EMAIL_ALREADY_TAKEN`, `UNPROCESSABLE_ENTITY`) and
//! carry the message that triggered them. Everything else is a passthrough
//! fault from a lower layer. The `IntoResponse` impl is the single place
//! where tags are translated to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Business rules
    #[error("{0}")]
    InvalidPassword(String),

    #[error("{0}")]
    EmailAlreadyTaken(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    // Request decoding
    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    description: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidPassword(_) => "INVALID_PASSWORD",
            AppError::EmailAlreadyTaken(_) => "EMAIL_ALREADY_TAKEN",
            AppError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPassword(_) => StatusCode::FORBIDDEN,
            AppError::EmailAlreadyTaken(_) => StatusCode::CONFLICT,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short human description of the error kind
    fn description(&self) -> &'static str {
        match self {
            AppError::InvalidPassword(_) => "Invalid password",
            AppError::EmailAlreadyTaken(_) => "Email already taken",
            AppError::UnprocessableEntity(_) => "Unprocessable entity",
            AppError::BadRequest(_) => "Bad request",
            AppError::Database(_) | AppError::Internal(_) => "Internal server error",
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                description: self.description().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_password(msg: impl Into<String>) -> Self {
        AppError::InvalidPassword(msg.into())
    }

    pub fn email_already_taken(msg: impl Into<String>) -> Self {
        AppError::EmailAlreadyTaken(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        AppError::UnprocessableEntity(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
