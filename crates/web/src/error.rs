//! Unified error handling.
//!
//! Provides a unified `AppError` type for route handlers. Recoverable
//! conditions (validation failures, duplicate names, bad credentials) are
//! handled inside the handlers by re-rendering forms or redirecting; what
//! reaches this type becomes a user-visible error page, never a crash.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Anti-forgery token missing or invalid.
    #[error("Invalid or missing anti-forgery token")]
    InvalidCsrf,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server-side failures
        if matches!(
            self,
            Self::Database(_) | Self::Session(_) | Self::Template(_)
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(_) | Self::Session(_) | Self::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::UnknownEmail | AuthError::WrongPassword => StatusCode::UNAUTHORIZED,
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidCsrf => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Session(_) | Self::Template(_) => {
                "Internal server error".to_string()
            }
            Self::Auth(err) => match err {
                AuthError::UnknownEmail | AuthError::WrongPassword => {
                    "Invalid credentials".to_string()
                }
                AuthError::EmailTaken => "An account with this email already exists".to_string(),
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::NotFound(_) => "Not found".to_string(),
            Self::InvalidCsrf => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("cafe 123".to_string());
        assert_eq!(err.to_string(), "Not found: cafe 123");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(AppError::InvalidCsrf), StatusCode::BAD_REQUEST);
        assert_eq!(
            get_status(AppError::Auth(AuthError::WrongPassword)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::EmailTaken)),
            StatusCode::CONFLICT
        );
    }
}
