//! Sign Up Use Case
//!
//! Registers a new account with its profile and signs it in.
//!
//! Checks run in a fixed order and stop at the first failure:
//! handle derivation, handle uniqueness, email uniqueness. Nothing is
//! written before all of them pass.

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;

use crate::application::config::AuthConfig;
use crate::application::establish_session::establish_session;
use crate::application::session_authority::SessionAuthority;
use crate::domain::entity::{
    account::{Account, NewAccount},
    profile::Profile,
};
use crate::domain::repository::{AccountLookup, AccountRepository, AccountSelect};
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    handle::Handle,
    password::{PasswordDigest, RawPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub display_name: String,
    /// Must equal the handle derived from `display_name`
    pub handle: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub account: Account,
    pub profile: Profile,
    /// Carries the new session cookie
    pub jar: CookieJar,
}

/// Sign up use case
pub struct SignUpUseCase<A, S>
where
    A: AccountRepository,
    S: SessionAuthority,
{
    accounts: Arc<A>,
    authority: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> SignUpUseCase<A, S>
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

    pub async fn execute(&self, input: SignUpInput, jar: CookieJar) -> AuthResult<SignUpOutput> {
        let handle = Handle::derive(&input.display_name);
        if !handle.matches(&input.handle) {
            return Err(AuthError::InvalidHandle);
        }
        if handle.is_empty() {
            return Err(AuthError::Validation(
                "Display name must contain at least one letter or digit".to_string(),
            ));
        }

        let display_name = DisplayName::new(&input.display_name)?;
        let email = Email::new(&input.email)?;

        if self
            .accounts
            .find_account(&AccountLookup::by_handle(handle.clone()), AccountSelect::ID_ONLY)
            .await?
            .is_some()
        {
            return Err(AuthError::HandleAlreadyInUse);
        }

        if self
            .accounts
            .find_account(&AccountLookup::by_email(email.clone()), AccountSelect::ID_ONLY)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let raw_password = RawPassword::new(input.password);
        let pepper = self.config.password_pepper.clone();
        let password_hash = tokio::task::spawn_blocking(move || {
            PasswordDigest::from_raw(&raw_password, pepper.as_deref())
        })
        .await??;

        let new_account = NewAccount::new(email, password_hash, display_name, handle);
        self.accounts.create_account(&new_account).await?;

        let jar = establish_session(self.authority.as_ref(), &new_account.account.id, jar).await?;

        tracing::info!(
            account_id = %new_account.account.id,
            handle = %new_account.profile.handle,
            "Account signed up"
        );

        Ok(SignUpOutput {
            account: new_account.account,
            profile: new_account.profile,
            jar,
        })
    }
}
