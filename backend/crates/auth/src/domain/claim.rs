//! Session Claim
//!
//! The payload carried inside a credential. The server holds no
//! per-credential state; everything needed to authenticate a request is
//! in here, signed.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use kernel::id::UserId;

use crate::domain::role::Role;

/// Identity snapshot taken at issuance time.
///
/// `email` and `email_verified` may become stale over the credential's
/// lifetime; they are not re-validated per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub subject_id: UserId,
    pub email: String,
    pub role: Role,
    pub email_verified: bool,
}

/// Decoded credential payload
///
/// Serialized as compact camelCase JSON in the credential's second
/// segment. Field order is fixed by the struct, which keeps issuance
/// deterministic for identical input and clock second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaim {
    pub subject_id: UserId,
    pub email: String,
    pub role: Role,
    pub email_verified: bool,
    /// Unix seconds
    pub issued_at: i64,
    /// Unix seconds. Always set on issuance; tolerated as absent on
    /// decode, in which case the credential never expires.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl SessionClaim {
    /// Build a claim for issuance. `expires_at > issued_at` holds for
    /// any non-zero TTL.
    pub fn issue(identity: SessionIdentity, now_secs: i64, ttl: Duration) -> Self {
        Self {
            subject_id: identity.subject_id,
            email: identity.email,
            role: identity.role,
            email_verified: identity.email_verified,
            issued_at: now_secs,
            expires_at: Some(now_secs + ttl.as_secs() as i64),
        }
    }

    /// Strictly past expiry; a credential verified in its expiry second
    /// is still accepted.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp < now_secs)
    }

    /// Seconds until expiry, clamped at zero
    pub fn remaining_secs(&self, now_secs: i64) -> i64 {
        self.expires_at
            .map(|exp| (exp - now_secs).max(0))
            .unwrap_or(i64::MAX)
    }
}
