//! Domain Layer
//!
//! Session claims, roles, and the credential codec.

pub mod claim;
pub mod role;
pub mod token;

// Re-exports
pub use claim::{SessionClaim, SessionIdentity};
pub use role::Role;
pub use token::{TOKEN_HEADER, TokenCodec, TokenError};
