//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::application::session_authority::{DbSessionAuthority, SessionAuthority};
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::refresh_session;

/// State of the PostgreSQL-backed service
pub type PgAuthState = AuthAppState<PgAuthRepository, DbSessionAuthority<PgAuthRepository>>;

/// Build the PostgreSQL-backed state
pub fn pg_auth_state(repo: PgAuthRepository, config: AuthConfig) -> PgAuthState {
    AuthAppState::from_repository(repo, config)
}

/// Auth routes. `/me` reads [`AuthLocals`](crate::application::AuthLocals),
/// so the final router must be wrapped with [`with_session_refresh`].
pub fn auth_router<A, S>(state: AuthAppState<A, S>) -> Router
where
    A: AccountRepository + Send + Sync + 'static,
    S: SessionAuthority + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<A, S>))
        .route("/signin", post(handlers::sign_in::<A, S>))
        .route("/signout", post(handlers::sign_out::<A, S>))
        .route("/me", get(handlers::me))
        .with_state(state)
}

/// Run the session refresh step in front of every route of `router`
pub fn with_session_refresh<A, S>(router: Router, state: AuthAppState<A, S>) -> Router
where
    A: Send + Sync + 'static,
    S: SessionAuthority + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(
        state,
        refresh_session::<A, S>,
    ))
}
