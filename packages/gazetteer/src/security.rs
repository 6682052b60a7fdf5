//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of sensitive
//! values such as the Places API key.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g., in an API
    /// request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
