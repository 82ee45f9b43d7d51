//! Token Codec
//!
//! Issues and verifies the three-segment session credential:
//! `base64url(header) . base64url(claim JSON) . base64url(HMAC-SHA256)`,
//! each segment unpadded, the signature computed over the first two
//! segments with the server-held secret. Verification is stateless; the
//! signature is recomputed from the presented credential alone.

use std::time::Duration;

use platform::clock::{Clock, SystemClock};
use platform::crypto::{from_base64url, hmac_sha256, hmac_sha256_verify, to_base64url};

use crate::domain::claim::{SessionClaim, SessionIdentity};

/// Fixed header segment content, identifying the signing algorithm
pub const TOKEN_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Verification failure causes.
///
/// Variants stay distinguishable for downstream UX (an expired session
/// can prompt re-login), but every variant renders the same client-facing
/// message: which check failed must not be observable to a forger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Wrong segment count, undecodable segment, or unparsable claim
    #[error("invalid session credential")]
    Malformed,
    /// Recomputed HMAC does not match the presented signature
    #[error("invalid session credential")]
    InvalidSignature,
    /// Claim was well-formed and signed, but past its expiry
    #[error("invalid session credential")]
    Expired,
}

/// Stateless credential codec
///
/// Pure functions of the input, the secret, and the clock; no storage,
/// no I/O, no synchronization needed.
pub struct TokenCodec<C: Clock = SystemClock> {
    secret: Vec<u8>,
    clock: C,
}

impl TokenCodec<SystemClock> {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self::with_clock(secret, SystemClock)
    }
}

impl<C: Clock> TokenCodec<C> {
    pub fn with_clock(secret: impl Into<Vec<u8>>, clock: C) -> Self {
        Self {
            secret: secret.into(),
            clock,
        }
    }

    /// Issue a credential for an identity with the given time-to-live.
    ///
    /// Two calls with identical identity within the same clock second
    /// produce byte-identical credentials.
    pub fn issue(&self, identity: SessionIdentity, ttl: Duration) -> String {
        let claim = SessionClaim::issue(identity, self.clock.now_secs(), ttl);
        self.encode(&claim)
    }

    /// Encode and sign an already-built claim
    pub fn encode(&self, claim: &SessionClaim) -> String {
        let payload =
            serde_json::to_string(claim).expect("session claim serializes to JSON");

        let signing_input = format!(
            "{}.{}",
            to_base64url(TOKEN_HEADER.as_bytes()),
            to_base64url(payload.as_bytes())
        );
        let signature = hmac_sha256(&self.secret, signing_input.as_bytes());

        format!("{}.{}", signing_input, to_base64url(&signature))
    }

    /// Verify a presented credential and return its claim.
    ///
    /// Checks run in order: segment structure, signature (constant-time
    /// compare), claim decoding, expiry. Expected failures are returned,
    /// never panicked.
    pub fn verify(&self, credential: &str) -> Result<SessionClaim, TokenError> {
        let mut segments = credential.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let tag = from_base64url(signature).map_err(|_| TokenError::InvalidSignature)?;
        let signing_input = &credential[..header.len() + 1 + payload.len()];
        if !hmac_sha256_verify(&self.secret, signing_input.as_bytes(), &tag) {
            return Err(TokenError::InvalidSignature);
        }

        // Only signed payloads get decoded
        let payload = from_base64url(payload).map_err(|_| TokenError::Malformed)?;
        let claim: SessionClaim =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if claim.is_expired(self.clock.now_secs()) {
            return Err(TokenError::Expired);
        }

        Ok(claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Role;
    use kernel::id::Id;
    use platform::clock::ManualClock;
    use std::sync::Arc;

    const SECRET: &[u8] = b"test-secret-at-least-32-bytes-long!";

    fn identity() -> SessionIdentity {
        SessionIdentity {
            subject_id: "c7f9a7a4-45a6-4f9c-9d35-1f6a3f1ce0aa".parse().unwrap(),
            email: "client@example.com".to_string(),
            role: Role::Client,
            email_verified: true,
        }
    }

    fn codec_at(now_ms: i64) -> (Arc<ManualClock>, TokenCodec<Arc<ManualClock>>) {
        let clock = Arc::new(ManualClock::new(now_ms));
        let codec = TokenCodec::with_clock(SECRET, clock.clone());
        (clock, codec)
    }

    #[test]
    fn test_round_trip() {
        let (_clock, codec) = codec_at(1_700_000_000_000);
        let token = codec.issue(identity(), Duration::from_secs(3600));

        let claim = codec.verify(&token).unwrap();
        assert_eq!(claim.subject_id, identity().subject_id);
        assert_eq!(claim.email, "client@example.com");
        assert_eq!(claim.role, Role::Client);
        assert!(claim.email_verified);
        assert_eq!(claim.issued_at, 1_700_000_000);
        assert_eq!(claim.expires_at, Some(1_700_000_000 + 3600));
    }

    #[test]
    fn test_deterministic_within_a_second() {
        let (_clock, codec) = codec_at(1_700_000_000_400);
        let a = codec.issue(identity(), Duration::from_secs(60));
        let b = codec.issue(identity(), Duration::from_secs(60));
        assert_eq!(a, b);

        let (_clock, codec) = codec_at(1_700_000_001_000);
        let c = codec.issue(identity(), Duration::from_secs(60));
        assert_ne!(a, c);
    }

    #[test]
    fn test_three_segments_unpadded() {
        let (_clock, codec) = codec_at(1_700_000_000_000);
        let token = codec.issue(identity(), Duration::from_secs(60));
        assert_eq!(token.split('.').count(), 3);
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }

    #[test]
    fn test_tamper_detection_every_byte() {
        let (_clock, codec) = codec_at(1_700_000_000_000);
        let token = codec.issue(identity(), Duration::from_secs(3600));

        let bytes = token.as_bytes();
        for i in 0..bytes.len() {
            if bytes[i] == b'.' {
                continue;
            }
            let mut flipped = bytes.to_vec();
            flipped[i] ^= 0x01;
            let flipped = String::from_utf8(flipped).unwrap();
            assert!(
                codec.verify(&flipped).is_err(),
                "bit flip at byte {i} was not rejected"
            );
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (_clock, codec) = codec_at(1_700_000_000_000);
        let token = codec.issue(identity(), Duration::from_secs(60));

        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let other = TokenCodec::with_clock(b"another-secret".to_vec(), clock);
        assert_eq!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expiry_enforcement() {
        let (clock, codec) = codec_at(1_700_000_000_000);
        let token = codec.issue(identity(), Duration::from_secs(1));

        // Immediately valid
        assert!(codec.verify(&token).is_ok());

        // Still accepted in the expiry second itself
        clock.advance_ms(1_000);
        assert!(codec.verify(&token).is_ok());

        clock.advance_ms(1_000);
        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_malformed_inputs_never_panic() {
        let (_clock, codec) = codec_at(1_700_000_000_000);
        let cases = [
            "",
            "a",
            "a.b",
            "a.b.c.d",
            "...",
            "\u{0}garbage\u{0}",
            "!!!.???.***",
        ];
        for case in cases {
            assert!(codec.verify(case).is_err(), "accepted {case:?}");
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let (_clock, codec) = codec_at(1_700_000_000_000);
        // Correctly signed payload with a role outside the closed set
        let payload = r#"{"subjectId":"c7f9a7a4-45a6-4f9c-9d35-1f6a3f1ce0aa","email":"a@b.c","role":"root","emailVerified":true,"issuedAt":1700000000,"expiresAt":1800000000}"#;
        let signing_input = format!(
            "{}.{}",
            to_base64url(TOKEN_HEADER.as_bytes()),
            to_base64url(payload.as_bytes())
        );
        let sig = hmac_sha256(SECRET, signing_input.as_bytes());
        let token = format!("{}.{}", signing_input, to_base64url(&sig));

        assert_eq!(codec.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_rejection_messages_do_not_leak_cause() {
        // Clients must not be able to tell which check failed
        assert_eq!(
            TokenError::Malformed.to_string(),
            TokenError::InvalidSignature.to_string()
        );
        assert_eq!(
            TokenError::InvalidSignature.to_string(),
            TokenError::Expired.to_string()
        );
    }
}
