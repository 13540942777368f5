// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error response
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Already registered: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("No database connections available")]
    PoolExhausted,

    #[error("Database initialization failed: {0}")]
    InitializationFailed(String),
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::AlreadyExists(_) => "ALREADY_EXISTS",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::PoolExhausted => "SERVICE_UNAVAILABLE",
            ApiError::InitializationFailed(_) => "INITIALIZATION_FAILED",
        }
    }
}

/// Convert ApiError to HTTP response
/// DOCUMENTATION: Generic JSON error body; internals are never leaked to clients
impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        // Database details stay in the server log only
        let message = match self {
            ApiError::DatabaseError(_) | ApiError::InitializationFailed(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists(_) => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::PoolExhausted => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InitializationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Translate sqlx errors at the repository boundary
/// DOCUMENTATION: Pool timeouts and unique violations get their own variants,
/// everything else collapses into DatabaseError
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => ApiError::PoolExhausted,
            sqlx::Error::RowNotFound => ApiError::NotFound("record".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.code().as_deref() == Some("23505") {
                    ApiError::AlreadyExists(db_err.message().to_string())
                } else {
                    ApiError::DatabaseError(db_err.message().to_string())
                }
            }
            _ => ApiError::DatabaseError(err.to_string()),
        }
    }
}
