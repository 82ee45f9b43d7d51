//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod issue_session;
pub mod verify_session;

// Re-exports
pub use config::AuthConfig;
pub use issue_session::{IssueSessionOutput, IssueSessionUseCase, TokenPurpose};
pub use verify_session::{AuthContext, VerifySessionUseCase};
