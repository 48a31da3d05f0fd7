//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::refresh_session;
pub use router::{PgAuthState, auth_router, pg_auth_state, with_session_refresh};
