//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod establish_session;
pub mod locals;
pub mod refresh_session;
pub mod session_authority;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use establish_session::establish_session;
pub use locals::AuthLocals;
pub use refresh_session::RefreshSessionUseCase;
pub use session_authority::{DbSessionAuthority, SessionAuthority, ValidatedSession};
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
