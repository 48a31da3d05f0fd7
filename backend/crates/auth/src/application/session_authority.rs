//! Session Authority
//!
//! Creates, validates and invalidates sessions, and describes the cookie
//! that carries a session reference. Handlers and middleware only talk to
//! this port; [`DbSessionAuthority`] is the database-backed implementation.
//!
//! ## Token format
//! `{session_id}.{signature}` where the signature is an HMAC-SHA256 of the
//! session id under the configured secret (base64url, no padding). Tokens
//! with a bad signature are rejected before any store lookup.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::SessionId;
use platform::cookie::SessionCookie;
use platform::crypto;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::{Session, SessionUser};
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::AuthResult;

/// A session that passed validation, with the account it belongs to.
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    pub session: Session,
    pub user: SessionUser,
}

#[trait_variant::make(SessionAuthority: Send)]
pub trait LocalSessionAuthority {
    /// Name of the session cookie
    fn cookie_name(&self) -> &str;

    /// Persist a new, fresh session for the account
    async fn create_session(&self, account_id: &AccountId) -> AuthResult<Session>;

    /// Resolve a cookie token. `None` when the token is forged, unknown or
    /// expired. Sessions in their refresh window come back extended and
    /// marked fresh.
    async fn validate_session(&self, token: &str) -> AuthResult<Option<ValidatedSession>>;

    /// Delete the session referenced by a token, if any
    async fn invalidate_session(&self, token: &str) -> AuthResult<()>;

    /// Cookie carrying a reference to `session`
    fn session_cookie(&self, session: &Session) -> SessionCookie;

    /// Cookie that clears the client's session reference
    fn blank_session_cookie(&self) -> SessionCookie;
}

/// Session authority backed by a [`SessionRepository`]
pub struct DbSessionAuthority<R>
where
    R: SessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> DbSessionAuthority<R>
where
    R: SessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    fn token_for(&self, session_id: &SessionId) -> String {
        crypto::sign(&self.config.session_secret, &session_id.to_string())
    }

    fn parse_token(&self, token: &str) -> Option<SessionId> {
        crypto::verify_signed(&self.config.session_secret, token)?
            .parse()
            .ok()
    }
}

impl<R> SessionAuthority for DbSessionAuthority<R>
where
    R: SessionRepository + Send + Sync,
{
    fn cookie_name(&self) -> &str {
        &self.config.session_cookie_name
    }

    async fn create_session(&self, account_id: &AccountId) -> AuthResult<Session> {
        let session = Session::new(*account_id, self.config.session_ttl_delta());
        self.repo.insert(&session).await?;

        tracing::debug!(
            session_id = %session.id,
            account_id = %account_id,
            "Session created"
        );

        Ok(session)
    }

    async fn validate_session(&self, token: &str) -> AuthResult<Option<ValidatedSession>> {
        let Some(session_id) = self.parse_token(token) else {
            tracing::debug!("Rejected session token with bad signature");
            return Ok(None);
        };

        let Some((mut session, user)) = self.repo.find_with_user(&session_id).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        if session.is_expired_at(now) {
            self.repo.delete(&session.id).await?;
            tracing::debug!(session_id = %session.id, "Expired session removed");
            return Ok(None);
        }

        let ttl = self.config.session_ttl_delta();
        if session.needs_extension_at(now, ttl) {
            session.extend(now, ttl);
            self.repo
                .update_expiry(&session.id, session.expires_at)
                .await?;
            tracing::debug!(session_id = %session.id, "Session extended");
        }

        Ok(Some(ValidatedSession { session, user }))
    }

    async fn invalidate_session(&self, token: &str) -> AuthResult<()> {
        if let Some(session_id) = self.parse_token(token) {
            self.repo.delete(&session_id).await?;
        }
        Ok(())
    }

    fn session_cookie(&self, session: &Session) -> SessionCookie {
        let mut attributes = self.config.cookie_attributes();
        attributes.max_age_secs = Some((session.expires_at - Utc::now()).num_seconds().max(0));

        SessionCookie::new(
            self.config.session_cookie_name.clone(),
            self.token_for(&session.id),
            attributes,
        )
    }

    fn blank_session_cookie(&self) -> SessionCookie {
        SessionCookie::blank(
            self.config.session_cookie_name.clone(),
            self.config.cookie_attributes(),
        )
    }
}
