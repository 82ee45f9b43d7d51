//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    AuthMiddlewareState, RateLimitPolicy, ThrottleState, authenticate, require_auth, throttle,
};
pub use router::auth_router;
