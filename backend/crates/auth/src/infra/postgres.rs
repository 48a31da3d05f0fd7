//! PostgreSQL Repository Implementations
//!
//! Tables used:
//! - `accounts (account_id, email UNIQUE accounts_email_key, password_hash, created_at)`
//! - `profiles (account_id, display_name, handle UNIQUE profiles_handle_key, created_at)`
//! - `interface_settings (account_id)`, `privacy_settings (account_id)`
//! - `auth_sessions (session_id UUID, account_id, expires_at TIMESTAMPTZ)`

use chrono::{DateTime, Utc};
use kernel::id::SessionId;
use sqlx::PgPool;

use crate::domain::entity::{
    account::NewAccount,
    profile::Profile,
    session::{Session, SessionUser},
};
use crate::domain::repository::{
    AccountLookup, AccountRecord, AccountRepository, AccountSelect, SessionRepository,
};
use crate::domain::value_object::{
    account_id::AccountId, display_name::DisplayName, email::Email, handle::Handle,
    password::PasswordDigest,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `profiles.handle`
const PROFILES_HANDLE_KEY: &str = "profiles_handle_key";
/// Unique constraint on `accounts.email`
const ACCOUNTS_EMAIL_KEY: &str = "accounts_email_key";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lost races on the unique keys become the same typed errors the
/// pre-checks in sign-up produce.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(PROFILES_HANDLE_KEY) => return AuthError::HandleAlreadyInUse,
                Some(ACCOUNTS_EMAIL_KEY) => return AuthError::EmailAlreadyInUse,
                _ => {}
            }
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn find_account(
        &self,
        lookup: &AccountLookup,
        select: AccountSelect,
    ) -> AuthResult<Option<AccountRecord>> {
        if lookup.is_empty() {
            return Ok(None);
        }

        // NULL never compares equal, so an absent criterion matches no row
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                a.account_id,
                a.email,
                a.password_hash,
                a.created_at,
                p.display_name,
                p.handle,
                p.created_at AS profile_created_at
            FROM accounts a
            LEFT JOIN profiles p ON p.account_id = a.account_id
            WHERE p.handle = $1 OR a.email = $2
            LIMIT 1
            "#,
        )
        .bind(lookup.handle.as_ref().map(Handle::as_str))
        .bind(lookup.email.as_ref().map(Email::as_str))
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record(select)).transpose()
    }

    async fn create_account(&self, new_account: &NewAccount) -> AuthResult<()> {
        let NewAccount { account, profile } = new_account;
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO accounts (account_id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.id.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (account_id, display_name, handle, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(profile.account_id.as_str())
        .bind(profile.display_name.as_str())
        .bind(profile.handle.as_str())
        .bind(profile.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        sqlx::query("INSERT INTO interface_settings (account_id) VALUES ($1)")
            .bind(account.id.as_str())
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO privacy_settings (account_id) VALUES ($1)")
            .bind(account.id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn insert(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (session_id, account_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.account_id.as_str())
        .bind(session.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_with_user(
        &self,
        session_id: &SessionId,
    ) -> AuthResult<Option<(Session, SessionUser)>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                s.session_id,
                s.account_id,
                s.expires_at,
                a.email
            FROM auth_sessions s
            JOIN accounts a ON a.account_id = s.account_id
            WHERE s.session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn update_expiry(
        &self,
        session_id: &SessionId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        sqlx::query("UPDATE auth_sessions SET expires_at = $2 WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    display_name: Option<String>,
    handle: Option<String>,
    profile_created_at: Option<DateTime<Utc>>,
}

impl AccountRow {
    /// Only the attributes `select` asks for are decoded, so a malformed
    /// digest cannot break an existence check.
    fn into_record(self, select: AccountSelect) -> AuthResult<AccountRecord> {
        let id = parse_account_id(&self.account_id)?;

        let password_hash = if select.password_hash {
            let digest = PasswordDigest::from_phc_string(self.password_hash)
                .map_err(|e| AuthError::Internal(e.to_string()))?;
            Some(digest)
        } else {
            None
        };

        let profile = match (self.display_name, self.handle, self.profile_created_at) {
            (Some(display_name), Some(handle), Some(created_at)) if select.profile => {
                Some(Profile {
                    account_id: id,
                    display_name: DisplayName::from_db(display_name),
                    handle: Handle::from_db(handle),
                    created_at,
                })
            }
            _ => None,
        };

        Ok(AccountRecord {
            id,
            email: select.email.then(|| Email::from_db(self.email)),
            password_hash,
            profile,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: uuid::Uuid,
    account_id: String,
    expires_at: DateTime<Utc>,
    email: String,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<(Session, SessionUser)> {
        let account_id = parse_account_id(&self.account_id)?;

        let session = Session::from_db(
            SessionId::from_uuid(self.session_id),
            account_id,
            self.expires_at,
        );
        let user = SessionUser {
            id: account_id,
            email: Email::from_db(self.email),
        };

        Ok((session, user))
    }
}

fn parse_account_id(raw: &str) -> AuthResult<AccountId> {
    AccountId::parse_str(raw)
        .map_err(|e| AuthError::Internal(format!("Invalid account_id: {}", e.message())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use crate::domain::value_object::password::RawPassword;

    #[derive(Debug)]
    struct TestDbError {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for TestDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test database error")
        }
    }

    impl StdError for TestDbError {}

    impl DatabaseError for TestDbError {
        fn message(&self) -> &str {
            "test database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(code: &'static str, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(TestDbError { code, constraint }))
    }

    #[test]
    fn test_unique_violation_on_handle_key() {
        let err = map_unique_violation(db_error("23505", Some(PROFILES_HANDLE_KEY)));
        assert!(matches!(err, AuthError::HandleAlreadyInUse));
    }

    #[test]
    fn test_unique_violation_on_email_key() {
        let err = map_unique_violation(db_error("23505", Some(ACCOUNTS_EMAIL_KEY)));
        assert!(matches!(err, AuthError::EmailAlreadyInUse));
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        let err = map_unique_violation(db_error("23505", Some("auth_sessions_pkey")));
        assert!(matches!(err, AuthError::Database(_)));

        // foreign key violation naming a known constraint is not a duplicate
        let err = map_unique_violation(db_error("23503", Some(ACCOUNTS_EMAIL_KEY)));
        assert!(matches!(err, AuthError::Database(_)));

        let err = map_unique_violation(sqlx::Error::RowNotFound);
        assert!(matches!(err, AuthError::Database(_)));
    }

    fn row(password_hash: &str) -> AccountRow {
        AccountRow {
            account_id: AccountId::new().to_string(),
            email: "ada@example.com".to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
            display_name: Some("Ada".to_string()),
            handle: Some("ada".to_string()),
            profile_created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_id_only_ignores_malformed_digest() {
        let record = row("not-a-phc-string")
            .into_record(AccountSelect::ID_ONLY)
            .unwrap();
        assert!(record.email.is_none());
        assert!(record.password_hash.is_none());
        assert!(record.profile.is_none());
    }

    #[test]
    fn test_credentials_reject_malformed_digest() {
        let err = row("not-a-phc-string")
            .into_record(AccountSelect::CREDENTIALS)
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[test]
    fn test_all_decodes_every_attribute() {
        let raw = RawPassword::new("pw");
        let digest = PasswordDigest::from_raw(&raw, None).unwrap();
        let record = row(digest.as_phc_string())
            .into_record(AccountSelect::ALL)
            .unwrap();

        assert_eq!(record.email.unwrap().as_str(), "ada@example.com");
        assert!(record.password_hash.unwrap().verify(&raw, None));
        let profile = record.profile.unwrap();
        assert_eq!(profile.handle.as_str(), "ada");
        assert_eq!(profile.account_id, record.id);
    }
}
