//! HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::locals::AuthLocals;
use crate::application::session_authority::{DbSessionAuthority, SessionAuthority};
use crate::application::{SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AccountResponse, SessionStatusResponse, SignInRequest, SignUpRequest,
};

/// Shared state for auth handlers and the session refresh middleware
pub struct AuthAppState<A, S> {
    pub accounts: Arc<A>,
    pub authority: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<A, S> AuthAppState<A, S> {
    pub fn new(accounts: Arc<A>, authority: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            accounts,
            authority,
            config,
        }
    }
}

impl<R> AuthAppState<R, DbSessionAuthority<R>>
where
    R: AccountRepository + SessionRepository,
{
    /// One repository serving both accounts and sessions
    pub fn from_repository(repo: R, config: AuthConfig) -> Self {
        let repo = Arc::new(repo);
        let config = Arc::new(config);
        let authority = Arc::new(DbSessionAuthority::new(repo.clone(), config.clone()));
        Self::new(repo, authority, config)
    }
}

impl<A, S> Clone for AuthAppState<A, S> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            authority: self.authority.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<A, S>(
    State(state): State<AuthAppState<A, S>>,
    jar: CookieJar,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    A: AccountRepository + Send + Sync + 'static,
    S: SessionAuthority + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.accounts.clone(),
        state.authority.clone(),
        state.config.clone(),
    );

    let input = SignUpInput {
        email: req.email,
        password: req.password,
        display_name: req.display_name,
        handle: req.handle,
    };

    let output = use_case.execute(input, jar).await?;
    let body = AccountResponse::new(&output.account, &output.profile);

    Ok((StatusCode::CREATED, output.jar, Json(body)))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<A, S>(
    State(state): State<AuthAppState<A, S>>,
    jar: CookieJar,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    A: AccountRepository + Send + Sync + 'static,
    S: SessionAuthority + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.accounts.clone(),
        state.authority.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let jar = use_case.execute(input, jar).await?;

    Ok((StatusCode::NO_CONTENT, jar))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<A, S>(
    State(state): State<AuthAppState<A, S>>,
    jar: CookieJar,
) -> AuthResult<impl IntoResponse>
where
    A: AccountRepository + Send + Sync + 'static,
    S: SessionAuthority + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.authority.clone());
    let jar = use_case.execute(jar).await?;

    Ok((StatusCode::NO_CONTENT, jar))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/me
///
/// Reads the state the refresh middleware attached; never touches the store.
pub async fn me(Extension(locals): Extension<AuthLocals>) -> Json<SessionStatusResponse> {
    Json(SessionStatusResponse::from(&locals))
}
