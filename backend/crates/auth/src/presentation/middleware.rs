//! Request Gatekeeper Middleware
//!
//! Composition point for authentication and rate limiting. Per request:
//! extract and verify the session cookie (never failing the request for
//! a bad cookie), attach the resulting [`AuthContext`], and throttle the
//! route's operation bucket before any handler logic runs.

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::client::client_identity;
use platform::rate_limit::{RateLimitConfig, RateLimitResult, RateLimitStore, bucket_key};

use crate::application::config::AuthConfig;
use crate::application::verify_session::{AuthContext, VerifySessionUseCase};
use crate::error::AuthError;

/// State for the authenticate middleware
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub verify: Arc<VerifySessionUseCase>,
    pub config: Arc<AuthConfig>,
}

/// Named bucket plus limits for one protected operation,
/// e.g. `("auth:signin", 5 per 60s)`
#[derive(Clone)]
pub struct RateLimitPolicy {
    pub operation: &'static str,
    pub config: RateLimitConfig,
}

impl RateLimitPolicy {
    pub fn new(operation: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            operation,
            config: RateLimitConfig::new(max_requests, window_secs),
        }
    }
}

/// State for the throttle middleware, one per protected route
pub struct ThrottleState<S> {
    pub store: Arc<S>,
    pub policy: RateLimitPolicy,
    pub config: Arc<AuthConfig>,
}

// Manual impl: a derive would demand `S: Clone`, but stores behind the
// `Arc` (mutex-guarded maps included) need not be cloneable themselves.
impl<S> Clone for ThrottleState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy.clone(),
            config: self.config.clone(),
        }
    }
}

/// Middleware that resolves the request's [`AuthContext`].
///
/// A missing, malformed, invalid, or expired cookie all leave the
/// request anonymous; rejection never fails the request here. Downstream
/// authorization decides what anonymous requests may do.
pub async fn authenticate(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let ctx = state.verify.inspect(token.as_deref());
    if let Some(cause) = ctx.rejection {
        tracing::debug!(?cause, "Ignoring rejected session credential");
    }

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

/// Middleware that rejects requests without a verified session
pub async fn require_auth(req: Request<Body>, next: Next) -> Result<Response, Response> {
    let ctx = req.extensions().get::<AuthContext>();

    if !ctx.is_some_and(AuthContext::is_authenticated) {
        let expired = ctx.is_some_and(AuthContext::is_expired_session);
        let mut response =
            (StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response();
        if expired {
            // Lets clients show "session expired" instead of "sign in"
            response
                .headers_mut()
                .insert("X-Session-Expired", HeaderValue::from_static("true"));
        }
        return Err(response);
    }

    Ok(next.run(req).await)
}

/// Middleware that throttles one operation bucket.
///
/// Identity is the verified token subject when the request carries one,
/// otherwise the client IP derived under the configured forward-trust
/// policy. Runs regardless of authentication outcome.
pub async fn throttle<S>(
    State(state): State<ThrottleState<S>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let peer = req
        .extensions()
        .get::<ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let identity = match req
        .extensions()
        .get::<AuthContext>()
        .and_then(|ctx| ctx.claim.as_ref())
    {
        Some(claim) => claim.subject_id.to_string(),
        None => client_identity(req.headers(), peer, &state.config.forward_trust),
    };

    let key = bucket_key(state.policy.operation, &identity);
    match state.store.check_and_increment(&key, &state.policy.config).await {
        Ok(result) if !result.allowed => {
            tracing::warn!(
                operation = state.policy.operation,
                identity = %identity,
                "Rate limit exceeded"
            );
            Err(rate_limited_response(result))
        }
        Ok(_) => Ok(next.run(req).await),
        Err(e) => {
            // Fail open: a broken limiter backend must not reject traffic
            tracing::error!(error = %e, "Rate limit store failure");
            Ok(next.run(req).await)
        }
    }
}

fn rate_limited_response(result: RateLimitResult) -> Response {
    let mut response = AuthError::RateLimited {
        reset_at_ms: result.reset_at_ms,
    }
    .into_response();

    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(result.remaining));
    headers.insert("X-RateLimit-Reset", HeaderValue::from(result.reset_at_ms));
    response
}
