//! Session token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer credential for the alerts backend, masked when printed and wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionToken {
    value: String,
}

impl SessionToken {
    const MIN_TOKEN_LENGTH: usize = 16;

    /// Creates new token with format validation.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let value = value.as_ref().trim();

        if value.len() < Self::MIN_TOKEN_LENGTH {
            return None;
        }

        if value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self {
            value: value.to_string(),
        })
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let char_count = self.value.chars().count();
        if char_count <= 10 {
            return "*".repeat(char_count);
        }

        let visible_prefix: String = self.value.chars().take(4).collect();
        let visible_suffix: String = self.value.chars().skip(char_count - 4).collect();
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "user42:9f8e7d6c5b4a39281706";

    #[test]
    fn test_valid_token_creation() {
        assert!(SessionToken::new(RAW).is_some());
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let token = SessionToken::new(format!("  {RAW}\n")).unwrap();
        assert_eq!(token.as_str(), RAW);
    }

    #[test]
    fn test_invalid_token_too_short() {
        assert!(SessionToken::new("short").is_none());
    }

    #[test]
    fn test_invalid_token_inner_whitespace() {
        assert!(SessionToken::new("user42 9f8e7d6c5b4a39281706").is_none());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = SessionToken::new_unchecked(RAW);
        let debug_output = format!("{token:?}");

        assert!(debug_output.contains("..."));
        assert!(!debug_output.contains(RAW));
    }

    #[test]
    fn test_short_token_fully_masked() {
        let token = SessionToken::new_unchecked("abc");
        assert_eq!(token.masked(), "***");
    }

    #[test]
    fn test_multibyte_token_masks_on_char_boundaries() {
        let token = SessionToken::new("€€€€€€").unwrap();
        assert_eq!(format!("{token}"), "******");

        let token = SessionToken::new("ключ-доступа-7f3a9c2e").unwrap();
        assert_eq!(token.masked(), "ключ...9c2e");
        assert!(format!("{token:?}").contains("ключ...9c2e"));
    }
}
