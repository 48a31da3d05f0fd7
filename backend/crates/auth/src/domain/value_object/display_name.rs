//! Display Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const DISPLAY_NAME_MAX_LENGTH: usize = 50;

/// Public name shown on a profile. Free-form text, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(input: impl AsRef<str>) -> AppResult<Self> {
        let name = input.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Display name cannot be empty"));
        }

        let length = name.chars().count();
        if length > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Display name must be at most {} characters (got {})",
                DISPLAY_NAME_MAX_LENGTH, length
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Display name contains invalid control characters",
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_input() {
        let name = DisplayName::new("  Ada Lovelace ").unwrap();
        assert_eq!(name.as_str(), "Ada Lovelace");
        assert_eq!(name.to_string(), "Ada Lovelace");
    }

    #[test]
    fn test_rejects_empty_and_too_long() {
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("a".repeat(DISPLAY_NAME_MAX_LENGTH)).is_ok());
        assert!(DisplayName::new("a".repeat(DISPLAY_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(DisplayName::new("Ada\u{0}Lovelace").is_err());
    }
}
