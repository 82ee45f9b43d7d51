//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credential rejected (malformed, bad signature, or expired).
    ///
    /// One variant for all three causes on the client-facing path; the
    /// underlying [`TokenError`] is kept for downstream UX decisions.
    #[error("Session is invalid or expired")]
    SessionInvalid(TokenError),

    /// Request exceeded its operation's rate limit
    #[error("Too many requests")]
    RateLimited {
        /// Unix ms when the current window resets
        reset_at_ms: i64,
    },

    /// No signing secret configured
    #[error("Session signing secret is not configured")]
    MissingSecret,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::SessionInvalid(_) => StatusCode::UNAUTHORIZED,
            AuthError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::MissingSecret | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::SessionInvalid(_) => ErrorKind::Unauthorized,
            AuthError::RateLimited { .. } => ErrorKind::TooManyRequests,
            AuthError::MissingSecret | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::SessionInvalid(cause) => {
                // Cause goes to the log, never to the client
                tracing::debug!(?cause, "Rejected session credential");
            }
            AuthError::RateLimited { reset_at_ms } => {
                tracing::warn!(reset_at_ms, "Rate limit exceeded");
            }
            AuthError::MissingSecret => {
                tracing::error!("Session signing secret is not configured");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
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

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::SessionInvalid(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::SessionInvalid(TokenError::Expired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::RateLimited { reset_at_ms: 0 }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AuthError::MissingSecret.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_session_invalid_message_hides_cause() {
        // Same rendering regardless of why the credential was rejected
        let messages: Vec<String> = [
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
        ]
        .into_iter()
        .map(|cause| AuthError::SessionInvalid(cause).to_string())
        .collect();
        assert_eq!(messages[0], messages[1]);
        assert_eq!(messages[1], messages[2]);
    }
}
