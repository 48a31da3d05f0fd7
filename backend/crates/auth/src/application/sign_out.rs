//! Sign Out Use Case
//!
//! Invalidates the current session and clears the cookie.

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;

use crate::application::session_authority::SessionAuthority;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionAuthority,
{
    authority: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionAuthority + Sync,
{
    pub fn new(authority: Arc<S>) -> Self {
        Self { authority }
    }

    /// Always answers with a blank session cookie, signed in or not.
    pub async fn execute(&self, jar: CookieJar) -> AuthResult<CookieJar> {
        let token = jar
            .get(self.authority.cookie_name())
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());

        if let Some(token) = token {
            self.authority.invalidate_session(&token).await?;
            tracing::info!("Session signed out");
        }

        Ok(jar.add(self.authority.blank_session_cookie().into_cookie()))
    }
}
