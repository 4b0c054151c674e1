//! Access token handling using the secrecy crate
//!
//! The Graph session token grants full control over the user's ad accounts.
//! It is held in a `Secret<T>` so that memory is zeroed on drop, `Debug`
//! output is redacted, and every read goes through an explicit
//! `expose_secret()` call.
//!
//! # Example
//!
//! ```rust
//! use rulebridge::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("EAAB-session-token".to_string());
//! assert_eq!(token.expose_secret().as_ref(), "EAAB-session-token");
//!
//! // Debug output is redacted
//! assert!(!format!("{token:?}").contains("EAAB"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A secret string: zeroed on drop, redacted in Debug, explicit access only
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("token-123".to_string());
        assert_eq!(secret.expose_secret(), "token-123");
        assert!(!secret.expose_secret().is_blank());
    }

    #[test]
    fn test_blank_secret() {
        assert!(secret_string("   ".to_string()).expose_secret().is_blank());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_deserialize() {
        #[derive(Deserialize)]
        struct TestConfig {
            access_token: SecretString,
        }

        let config: TestConfig = toml::from_str(r#"access_token = "abc""#).unwrap();
        assert_eq!(config.access_token.expose_secret(), "abc");
    }
}
