//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::client::ForwardTrust;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Secret key for HMAC signing of credentials
    pub session_secret: Vec<u8>,
    /// Sign-in session TTL (1 week)
    pub session_ttl: Duration,
    /// Password reset token TTL (1 hour)
    pub password_reset_ttl: Duration,
    /// Email verification token TTL (24 hours)
    pub email_verification_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// When to believe X-Forwarded-For / X-Real-IP
    pub forward_trust: ForwardTrust,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "sb_session".to_string(),
            session_secret: Vec::new(),
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            password_reset_ttl: Duration::from_secs(3600),   // 1 hour
            email_verification_ttl: Duration::from_secs(24 * 3600), // 24 hours
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            forward_trust: ForwardTrust::All,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    ///
    /// Never deploy this: credentials signed with a per-process random
    /// secret are invalidated on restart and cannot be shared across
    /// instances.
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }
}
