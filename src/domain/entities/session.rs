//! Authentication session snapshot.

use super::SessionToken;

/// What the application currently knows about the signed-in user.
///
/// A session without a token is never authenticated; the constructors are the
/// only way to build one, so that combination cannot be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<SessionToken>,
    is_authenticated: bool,
}

impl Session {
    /// Session with no credentials.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            is_authenticated: false,
        }
    }

    /// Session holding a token the backend has not confirmed yet.
    #[must_use]
    pub const fn pending(token: SessionToken) -> Self {
        Self {
            token: Some(token),
            is_authenticated: false,
        }
    }

    /// Session holding a validated token.
    #[must_use]
    pub const fn authenticated(token: SessionToken) -> Self {
        Self {
            token: Some(token),
            is_authenticated: true,
        }
    }

    /// Returns the token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Returns whether a token is present.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns whether the backend accepted the token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }
}
