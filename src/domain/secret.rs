//! Masked storage for the advice credential.

use serde::{Deserialize, Serialize};

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when handing it to the
/// advice collaborator or writing it to the store.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to a collaborator.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when no credential has been entered (whitespace counts as none).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("my-secret-key");

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("my-secret-key"));
        assert!(debug_output.contains("••••••••"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("my-secret-key"));

        assert_eq!(secret.expose(), "my-secret-key");
    }

    #[test]
    fn test_secure_string_persists_raw_value() {
        let secret = SecureString::new("k-123");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"k-123\"");
        let back: SecureString = serde_json::from_str("\"k-123\"").unwrap();
        assert_eq!(back, secret);
    }

    #[test]
    fn test_blank_detection() {
        assert!(SecureString::default().is_blank());
        assert!(SecureString::new("   ").is_blank());
        assert!(!SecureString::new("abc").is_blank());
    }
}
