//! Refresh Session Use Case
//!
//! Runs once per request: resolves the session cookie into [`AuthLocals`]
//! and queues at most one cookie update.
//!
//! | incoming cookie         | locals        | cookie written         |
//! |-------------------------|---------------|------------------------|
//! | absent or empty         | anonymous     | none                   |
//! | valid, not fresh        | authenticated | none                   |
//! | valid, fresh (extended) | authenticated | re-issued session      |
//! | invalid or expired      | anonymous     | blank (clears client)  |

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;

use crate::application::locals::AuthLocals;
use crate::application::session_authority::SessionAuthority;
use crate::error::AuthResult;

pub struct RefreshSessionUseCase<S>
where
    S: SessionAuthority,
{
    authority: Arc<S>,
}

impl<S> RefreshSessionUseCase<S>
where
    S: SessionAuthority + Sync,
{
    pub fn new(authority: Arc<S>) -> Self {
        Self { authority }
    }

    pub async fn execute(&self, jar: CookieJar) -> AuthResult<(CookieJar, AuthLocals)> {
        let token = jar
            .get(self.authority.cookie_name())
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());

        let Some(token) = token else {
            return Ok((jar, AuthLocals::anonymous()));
        };

        match self.authority.validate_session(&token).await? {
            Some(validated) => {
                let jar = if validated.session.fresh {
                    jar.add(self.authority.session_cookie(&validated.session).into_cookie())
                } else {
                    jar
                };
                Ok((jar, AuthLocals::authenticated(validated)))
            }
            None => {
                let jar = jar.add(self.authority.blank_session_cookie().into_cookie());
                Ok((jar, AuthLocals::anonymous()))
            }
        }
    }
}
