//! Verify Session Use Case
//!
//! Stateless verification of a presented credential. A rejected or
//! absent credential is not an error at this layer; the caller decides
//! what an anonymous request may do.

use std::sync::Arc;

use platform::clock::{Clock, SystemClock};

use crate::application::config::AuthConfig;
use crate::domain::claim::SessionClaim;
use crate::domain::token::{TokenCodec, TokenError};
use crate::error::{AuthError, AuthResult};

/// Outcome of looking at a request's (possibly absent) credential.
///
/// `rejection` is populated when a credential was presented but did not
/// verify, so downstream authorization can distinguish "was never signed
/// in" from "session expired" without this layer guessing the UX.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub claim: Option<SessionClaim>,
    pub rejection: Option<TokenError>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.claim.is_some()
    }

    pub fn is_expired_session(&self) -> bool {
        matches!(self.rejection, Some(TokenError::Expired))
    }
}

/// Verify session use case
pub struct VerifySessionUseCase<C: Clock = SystemClock> {
    codec: TokenCodec<C>,
}

impl VerifySessionUseCase<SystemClock> {
    pub fn new(config: Arc<AuthConfig>) -> AuthResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> VerifySessionUseCase<C> {
    pub fn with_clock(config: Arc<AuthConfig>, clock: C) -> AuthResult<Self> {
        if config.session_secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }
        Ok(Self {
            codec: TokenCodec::with_clock(config.session_secret.clone(), clock),
        })
    }

    /// Verify a credential, collapsing all rejection causes for callers
    /// that only need pass/fail
    pub fn execute(&self, session_token: &str) -> AuthResult<SessionClaim> {
        Ok(self.codec.verify(session_token)?)
    }

    /// Just check whether the credential verifies
    pub fn is_valid(&self, session_token: &str) -> bool {
        self.codec.verify(session_token).is_ok()
    }

    /// Build the per-request context from an optional cookie value
    pub fn inspect(&self, session_token: Option<&str>) -> AuthContext {
        match session_token {
            None => AuthContext::default(),
            Some(token) => match self.codec.verify(token) {
                Ok(claim) => AuthContext {
                    claim: Some(claim),
                    rejection: None,
                },
                Err(cause) => AuthContext {
                    claim: None,
                    rejection: Some(cause),
                },
            },
        }
    }
}
