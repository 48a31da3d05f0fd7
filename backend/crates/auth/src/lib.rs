//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Sign-up with email, password, display name and derived handle
//! - Sign-in with email + password
//! - Server-side sessions referenced by a signed cookie, refreshed on
//!   every request by middleware
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool
//! - Unknown accounts and wrong passwords are reported identically
//! - Session tokens are HMAC-signed; forged tokens never reach the store

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::locals::AuthLocals;
pub use error::{AuthError, AuthErrorCode, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::{PgAuthState, auth_router, pg_auth_state, with_session_refresh};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
