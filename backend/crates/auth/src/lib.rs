//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session claims, roles, the credential codec
//! - `application/` - Use cases and configuration
//! - `presentation/` - Gatekeeper middleware, HTTP handlers, router
//!
//! ## Features
//! - Stateless, tamper-evident session credentials (HMAC-SHA256 signed,
//!   cookie-held; no server-side session storage)
//! - Per-identity, per-operation fixed-window rate limiting
//! - Role-based identity context (Newcomer, Mentor, Client, Admin)
//!
//! ## Security Model
//! - Signature verification uses constant-time comparison
//! - Malformed, forged, and expired credentials are indistinguishable
//!   to clients; the cause is only recorded server-side
//! - A rejected credential downgrades the request to anonymous instead
//!   of failing it; downstream authorization decides the outcome
//! - Missing signing secret is a startup failure, never a silent default

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::verify_session::AuthContext;
pub use application::{IssueSessionUseCase, TokenPurpose, VerifySessionUseCase};
pub use domain::{Role, SessionClaim, SessionIdentity, TokenCodec, TokenError};
pub use error::{AuthError, AuthResult};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::claim::*;
    pub use crate::domain::role::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
