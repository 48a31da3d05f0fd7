//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use serde::Serialize;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Stable, client-facing codes for the auth failures a caller is expected
/// to branch on. Rendered as the `code` member of the problem response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AuthErrorCode {
    InvalidHandle,
    HandleAlreadyInUse,
    EmailAlreadyInUse,
    InvalidCredentials,
}

impl AuthErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthErrorCode::InvalidHandle => "InvalidHandle",
            AuthErrorCode::HandleAlreadyInUse => "HandleAlreadyInUse",
            AuthErrorCode::EmailAlreadyInUse => "EmailAlreadyInUse",
            AuthErrorCode::InvalidCredentials => "InvalidCredentials",
        }
    }
}

impl std::fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Supplied handle is not the one derived from the display name
    #[error("Handle does not match the display name")]
    InvalidHandle,

    #[error("Handle already in use")]
    HandleAlreadyInUse,

    #[error("Email already in use")]
    EmailAlreadyInUse,

    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Malformed input (email, display name, ...)
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Machine-readable code, for the variants clients branch on
    pub fn code(&self) -> Option<AuthErrorCode> {
        match self {
            AuthError::InvalidHandle => Some(AuthErrorCode::InvalidHandle),
            AuthError::HandleAlreadyInUse => Some(AuthErrorCode::HandleAlreadyInUse),
            AuthError::EmailAlreadyInUse => Some(AuthErrorCode::EmailAlreadyInUse),
            AuthError::InvalidCredentials => Some(AuthErrorCode::InvalidCredentials),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidHandle => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::HandleAlreadyInUse | AuthError::EmailAlreadyInUse => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidHandle => ErrorKind::UnprocessableEntity,
            AuthError::HandleAlreadyInUse | AuthError::EmailAlreadyInUse => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let error = match self {
            // never leak driver or internal detail to clients
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        };

        match self.code() {
            Some(code) => error.with_code(code.as_str()),
            None => error,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::InvalidHandle.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AuthError::HandleAlreadyInUse.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::EmailAlreadyInUse.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_matches_status() {
        for err in [
            AuthError::InvalidHandle,
            AuthError::HandleAlreadyInUse,
            AuthError::InvalidCredentials,
            AuthError::Validation("bad".into()),
        ] {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16());
        }
    }

    #[test]
    fn test_app_error_carries_code() {
        let app = AuthError::EmailAlreadyInUse.to_app_error();
        assert_eq!(app.code(), Some("EmailAlreadyInUse"));
        assert_eq!(AuthError::Validation("bad".into()).to_app_error().code(), None);
    }

    #[test]
    fn test_internal_detail_hidden() {
        let app = AuthError::Internal("pool exhausted".into()).to_app_error();
        assert!(!app.message().contains("pool exhausted"));
    }

    #[test]
    fn test_from_app_error() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Invalid email format"));

        let err: AuthError = AppError::internal("hash failure").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
