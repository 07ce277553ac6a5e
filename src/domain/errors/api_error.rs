//! Alerts API error types.

use thiserror::Error;

/// Failure returned by the alerts backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("session is not authorized")]
    Unauthorized,

    #[error("request rejected: {message}")]
    Rejected { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("unexpected API error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(ApiError::network("reset").is_recoverable());
        assert!(ApiError::RateLimited { retry_after_ms: 1 }.is_recoverable());
        assert!(!ApiError::Unauthorized.is_recoverable());
        assert!(!ApiError::rejected("bad symbol").is_recoverable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::rejected("unknown coin").to_string(),
            "request rejected: unknown coin"
        );
    }
}
