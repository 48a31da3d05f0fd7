//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded). Lookup is injectable so parsing can be tested without touching
//! the real environment.

use std::net::SocketAddr;
use std::time::Duration;

use auth::AuthConfig;
use platform::crypto;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
/// Upper bound for `AUTH_SESSION_TTL_DAYS`
pub const MAX_SESSION_TTL_DAYS: u64 = 3650;

/// Deployment environment (`APP_ENV`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    /// Automated test runs; outgoing mail is bypassed
    Test,
}

impl AppEnv {
    fn parse(raw: Option<&str>, debug_build: bool) -> Result<Self, ConfigError> {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            None if debug_build => Ok(AppEnv::Development),
            None => Ok(AppEnv::Production),
            Some("development" | "dev") => Ok(AppEnv::Development),
            Some("production" | "prod") => Ok(AppEnv::Production),
            Some("test") => Ok(AppEnv::Test),
            Some(other) => Err(ConfigError::Invalid {
                key: "APP_ENV",
                reason: format!("unknown environment '{}'", other),
            }),
        }
    }
}

/// Mail provider API key pair
pub struct MailCredentials {
    pub public_key: String,
    #[allow(dead_code)] // read by the mail delivery client
    pub private_key: String,
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug)]
pub struct Settings {
    pub env: AppEnv,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    /// `None` when mail is bypassed (test) or not configured (development)
    pub mail: Option<MailCredentials>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F, debug_build: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let env = AppEnv::parse(get("APP_ENV").as_deref(), debug_build)?;

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let auth = auth_config(&get, env, debug_build)?;
        let mail = mail_credentials(&get, env)?;

        Ok(Self {
            env,
            database_url,
            bind_addr,
            frontend_origins,
            auth,
            mail,
        })
    }
}

fn auth_config<G>(get: &G, env: AppEnv, debug_build: bool) -> Result<AuthConfig, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let mut config = match get("AUTH_SESSION_SECRET") {
        Some(encoded) => AuthConfig {
            session_secret: crypto::secret_from_base64(&encoded).map_err(|e| {
                ConfigError::Invalid {
                    key: "AUTH_SESSION_SECRET",
                    reason: e.to_string(),
                }
            })?,
            ..AuthConfig::default()
        },
        // random per process: sessions do not survive a restart
        None if debug_build || env != AppEnv::Production => AuthConfig::with_random_secret(),
        None => return Err(ConfigError::Missing("AUTH_SESSION_SECRET")),
    };

    config.cookie_secure = env == AppEnv::Production;
    config.password_pepper = get("AUTH_PASSWORD_PEPPER").map(String::into_bytes);

    if let Some(days) = get("AUTH_SESSION_TTL_DAYS") {
        let secs = days
            .parse::<u64>()
            .ok()
            .filter(|days| (1..=MAX_SESSION_TTL_DAYS).contains(days))
            .and_then(|days| days.checked_mul(24 * 3600))
            .ok_or_else(|| ConfigError::Invalid {
                key: "AUTH_SESSION_TTL_DAYS",
                reason: format!(
                    "expected between 1 and {} days, got '{}'",
                    MAX_SESSION_TTL_DAYS, days
                ),
            })?;
        config.session_ttl = Duration::from_secs(secs);
    }

    Ok(config)
}

fn mail_credentials<G>(get: &G, env: AppEnv) -> Result<Option<MailCredentials>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    if env == AppEnv::Test {
        return Ok(None);
    }

    match (get("MJ_APIKEY_PUBLIC"), get("MJ_APIKEY_PRIVATE")) {
        (Some(public_key), Some(private_key)) => Ok(Some(MailCredentials {
            public_key,
            private_key,
        })),
        (None, None) if env == AppEnv::Development => Ok(None),
        (None, _) => Err(ConfigError::Missing("MJ_APIKEY_PUBLIC")),
        (_, None) => Err(ConfigError::Missing("MJ_APIKEY_PRIVATE")),
    }
}
