//! API DTOs (Data Transfer Objects)

use serde::Serialize;

use crate::application::verify_session::AuthContext;

/// Session introspection response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    /// Set when a credential was presented but rejected as expired
    pub session_expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl From<&AuthContext> for SessionStatusResponse {
    fn from(ctx: &AuthContext) -> Self {
        match &ctx.claim {
            Some(claim) => Self {
                authenticated: true,
                session_expired: false,
                subject_id: Some(claim.subject_id.to_string()),
                role: Some(claim.role.code().to_string()),
                email_verified: Some(claim.email_verified),
                expires_at: claim.expires_at,
            },
            None => Self {
                authenticated: false,
                session_expired: ctx.is_expired_session(),
                subject_id: None,
                role: None,
                email_verified: None,
                expires_at: None,
            },
        }
    }
}
