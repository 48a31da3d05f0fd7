//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use chrono::TimeDelta;
use platform::cookie::CookieAttributes;
use platform::crypto::{self, SECRET_LEN};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Default session cookie name
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "auth_session";

/// Default session lifetime (30 days)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

/// Longest accepted session lifetime (3650 days)
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(3650 * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; SECRET_LEN],
    /// Session lifetime; sessions slide once less than half remains
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_secret: [0u8; SECRET_LEN],
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: crypto::random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session lifetime, capped at [`MAX_SESSION_TTL`]
    pub fn session_ttl_delta(&self) -> TimeDelta {
        let ttl = self.session_ttl.min(MAX_SESSION_TTL);
        TimeDelta::from_std(ttl).unwrap_or_else(|_| TimeDelta::days(30))
    }

    /// Base attributes for the session cookie. Max-Age is filled in per
    /// cookie by the session authority.
    pub fn cookie_attributes(&self) -> CookieAttributes {
        CookieAttributes {
            http_only: true,
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            path: None,
            max_age_secs: None,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "auth_session");
        assert_eq!(config.session_ttl_delta(), TimeDelta::days(30));
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
    }

    #[test]
    fn test_session_ttl_is_capped() {
        let config = AuthConfig {
            session_ttl: Duration::from_secs(u64::MAX),
            ..AuthConfig::development()
        };
        assert_eq!(config.session_ttl_delta(), TimeDelta::days(3650));

        let config = AuthConfig {
            session_ttl: Duration::from_secs(7 * 24 * 3600),
            ..AuthConfig::development()
        };
        assert_eq!(config.session_ttl_delta(), TimeDelta::days(7));
    }

    #[test]
    fn test_development_is_insecure_with_random_secret() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert_ne!(config.session_secret, [0u8; SECRET_LEN]);
        assert!(!config.cookie_attributes().secure);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper-value".to_vec()),
            ..AuthConfig::development()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("pepper-value"));
    }
}
