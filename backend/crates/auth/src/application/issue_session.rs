//! Issue Session Use Case
//!
//! Produces a signed credential and its Set-Cookie value. Who may be
//! issued a credential (password check, user lookup) is the caller's
//! concern; this use case only turns an already-authenticated identity
//! into a token.

use std::sync::Arc;
use std::time::Duration;

use platform::clock::{Clock, SystemClock};
use platform::cookie::CookieConfig;

use crate::application::config::AuthConfig;
use crate::domain::claim::SessionIdentity;
use crate::domain::token::TokenCodec;
use crate::error::{AuthError, AuthResult};

/// What the credential is for; selects the TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    /// Sign-in session (default 7 days)
    SignIn,
    /// Password reset token (default 1 hour)
    PasswordReset,
    /// Email verification token (default 24 hours)
    EmailVerification,
}

impl TokenPurpose {
    pub fn ttl(&self, config: &AuthConfig) -> Duration {
        match self {
            TokenPurpose::SignIn => config.session_ttl,
            TokenPurpose::PasswordReset => config.password_reset_ttl,
            TokenPurpose::EmailVerification => config.email_verification_ttl,
        }
    }
}

/// Issue session output
pub struct IssueSessionOutput {
    /// Credential string for the cookie value
    pub session_token: String,
    /// Complete Set-Cookie header value
    pub set_cookie: String,
}

/// Issue session use case
pub struct IssueSessionUseCase<C: Clock = SystemClock> {
    codec: TokenCodec<C>,
    config: Arc<AuthConfig>,
}

impl IssueSessionUseCase<SystemClock> {
    pub fn new(config: Arc<AuthConfig>) -> AuthResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> IssueSessionUseCase<C> {
    pub fn with_clock(config: Arc<AuthConfig>, clock: C) -> AuthResult<Self> {
        if config.session_secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }
        Ok(Self {
            codec: TokenCodec::with_clock(config.session_secret.clone(), clock),
            config,
        })
    }

    /// Issue a credential and its cookie for the given purpose
    pub fn execute(&self, identity: SessionIdentity, purpose: TokenPurpose) -> IssueSessionOutput {
        let ttl = purpose.ttl(&self.config);
        let session_token = self.codec.issue(identity, ttl);

        let cookie = self.cookie_config().with_max_age(ttl);
        let set_cookie = cookie.build_set_cookie(&session_token);

        IssueSessionOutput {
            session_token,
            set_cookie,
        }
    }

    /// Set-Cookie value that deletes the session cookie
    pub fn delete_cookie(&self) -> String {
        self.cookie_config().build_delete_cookie()
    }

    fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.config.session_cookie_name.clone(),
            secure: self.config.cookie_secure,
            same_site: self.config.cookie_same_site,
            ..CookieConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use kernel::id::Id;

    fn identity() -> SessionIdentity {
        SessionIdentity {
            subject_id: Id::new(),
            email: "newcomer@example.com".to_string(),
            role: Role::Newcomer,
            email_verified: false,
        }
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let config = Arc::new(AuthConfig::default());
        assert!(matches!(
            IssueSessionUseCase::new(config),
            Err(AuthError::MissingSecret)
        ));
    }

    #[test]
    fn test_signin_cookie_carries_session_ttl() {
        let config = Arc::new(AuthConfig::development());
        let use_case = IssueSessionUseCase::new(config).unwrap();

        let out = use_case.execute(identity(), TokenPurpose::SignIn);
        assert!(out.set_cookie.starts_with("sb_session="));
        assert!(out.set_cookie.contains(&out.session_token));
        assert!(out.set_cookie.contains("Max-Age=604800"));
        assert!(out.set_cookie.contains("HttpOnly"));
        assert!(out.set_cookie.contains("SameSite=Lax"));
        // development() uses an insecure cookie
        assert!(!out.set_cookie.contains("Secure"));
    }

    #[test]
    fn test_purpose_selects_ttl() {
        let config = Arc::new(AuthConfig::development());
        let use_case = IssueSessionUseCase::new(config).unwrap();

        let reset = use_case.execute(identity(), TokenPurpose::PasswordReset);
        assert!(reset.set_cookie.contains("Max-Age=3600"));

        let verify = use_case.execute(identity(), TokenPurpose::EmailVerification);
        assert!(verify.set_cookie.contains("Max-Age=86400"));
    }

    #[test]
    fn test_delete_cookie() {
        let config = Arc::new(AuthConfig::development());
        let use_case = IssueSessionUseCase::new(config).unwrap();
        let cookie = use_case.delete_cookie();
        assert!(cookie.starts_with("sb_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
