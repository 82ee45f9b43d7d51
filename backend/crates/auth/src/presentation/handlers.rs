//! HTTP Handlers

use axum::Extension;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::IssueSessionUseCase;
use crate::application::verify_session::AuthContext;
use crate::presentation::dto::SessionStatusResponse;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState {
    pub issue: Arc<IssueSessionUseCase>,
}

/// GET /status - introspect the current session
///
/// Always 200; the body says whether the request is authenticated and
/// whether a presented credential had expired.
pub async fn session_status(
    ctx: Option<Extension<AuthContext>>,
) -> Json<SessionStatusResponse> {
    let ctx = ctx.map(|Extension(ctx)| ctx).unwrap_or_default();
    Json(SessionStatusResponse::from(&ctx))
}

/// POST /signout - delete the session cookie
///
/// Credentials are self-contained, so "sign out" is purely client-side
/// cookie removal; the token stays technically valid until expiry.
pub async fn signout(State(state): State<AuthAppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, state.issue.delete_cookie())],
    )
}
