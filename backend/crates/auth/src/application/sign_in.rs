//! Sign In Use Case
//!
//! Verifies email and password and establishes a session.

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;

use crate::application::config::AuthConfig;
use crate::application::establish_session::establish_session;
use crate::application::session_authority::SessionAuthority;
use crate::domain::repository::{AccountLookup, AccountRepository, AccountSelect};
use crate::domain::value_object::{email::Email, password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<A, S>
where
    A: AccountRepository,
    S: SessionAuthority,
{
    accounts: Arc<A>,
    authority: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> SignInUseCase<A, S>
where
    A: AccountRepository + Sync,
    S: SessionAuthority + Sync,
{
    pub fn new(accounts: Arc<A>, authority: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            accounts,
            authority,
            config,
        }
    }

    /// Returns the jar carrying the new session cookie.
    ///
    /// An unknown email and a wrong password both fail with
    /// `InvalidCredentials`.
    pub async fn execute(&self, input: SignInInput, jar: CookieJar) -> AuthResult<CookieJar> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let record = self
            .accounts
            .find_account(&AccountLookup::by_email(email), AccountSelect::CREDENTIALS)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_hash = record
            .password_hash
            .ok_or_else(|| AuthError::Internal("Password hash not loaded".to_string()))?;

        let raw_password = RawPassword::new(input.password);
        let pepper = self.config.password_pepper.clone();
        let password_valid = tokio::task::spawn_blocking(move || {
            password_hash.verify(&raw_password, pepper.as_deref())
        })
        .await?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let jar = establish_session(self.authority.as_ref(), &record.id, jar).await?;

        tracing::info!(account_id = %record.id, "Account signed in");

        Ok(jar)
    }
}
