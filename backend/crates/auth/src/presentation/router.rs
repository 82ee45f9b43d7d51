//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use platform::rate_limit::RateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::{IssueSessionUseCase, VerifySessionUseCase};
use crate::error::AuthResult;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{
    AuthMiddlewareState, RateLimitPolicy, ThrottleState, authenticate, throttle,
};

/// Create the session router over any rate-limit store.
///
/// Fails when no signing secret is configured; callers treat that as a
/// startup error.
pub fn auth_router<S>(store: Arc<S>, config: AuthConfig) -> AuthResult<Router>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let verify = Arc::new(VerifySessionUseCase::new(config.clone())?);
    let issue = Arc::new(IssueSessionUseCase::new(config.clone())?);

    let state = AuthAppState { issue };

    let throttled = |policy: RateLimitPolicy| {
        middleware::from_fn_with_state(
            ThrottleState {
                store: store.clone(),
                policy,
                config: config.clone(),
            },
            throttle::<S>,
        )
    };

    let router = Router::new()
        .route(
            "/status",
            get(handlers::session_status)
                .route_layer(throttled(RateLimitPolicy::new("session:status", 60, 60))),
        )
        .route(
            "/signout",
            post(handlers::signout)
                .route_layer(throttled(RateLimitPolicy::new("session:signout", 10, 60))),
        )
        .layer(middleware::from_fn_with_state(
            AuthMiddlewareState {
                verify,
                config: config.clone(),
            },
            authenticate,
        ))
        .with_state(state);

    Ok(router)
}
