//! API key handling
//!
//! The key is held in an [`ApiKey`] whose `Debug` and `Display` output never
//! reveal the secret, so it can travel inside configuration structs that get
//! logged or printed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Environment variable holding the generation service key
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// A secret API key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank values
    pub fn new(key: impl Into<String>) -> Result<Self, ProviderError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ProviderError::MissingCredential(API_KEY_ENV_VAR.to_string()));
        }
        Ok(Self(key.trim().to_string()))
    }

    /// Read the key from the environment, after loading a local `.env` file
    pub fn from_env() -> Option<Self> {
        dotenv::dotenv().ok();
        std::env::var(API_KEY_ENV_VAR)
            .ok()
            .and_then(|key| Self::new(key).ok())
    }

    /// The secret itself, for building requests only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form showing at most the last four characters
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_missing_credential() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ProviderError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_key_is_trimmed() {
        let key = ApiKey::new("  secret-value-1234\n").unwrap();
        assert_eq!(key.expose(), "secret-value-1234");
    }

    #[test]
    fn test_debug_and_display_are_redacted() {
        let key = ApiKey::new("AIzaSyVerySecretKey9876").unwrap();
        let debug = format!("{:?}", key);
        let display = key.to_string();
        assert!(!debug.contains("VerySecret"));
        assert!(!display.contains("VerySecret"));
        assert_eq!(display, "****9876");
    }

    #[test]
    fn test_short_key_fully_masked() {
        let key = ApiKey::new("abc").unwrap();
        assert_eq!(key.masked(), "****");
    }
}
