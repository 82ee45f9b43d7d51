//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, base64url)
//! - Cookie management
//! - Client identity derivation for throttling
//! - Rate limiting infrastructure
//! - Injectable clock

pub mod client;
pub mod clock;
pub mod cookie;
pub mod crypto;
pub mod rate_limit;
