//! Signed-in user profile.

use serde::{Deserialize, Serialize};

/// Profile returned by the backend once a token is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    username: String,
    first_name: Option<String>,
}

impl User {
    /// Creates new user.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        first_name: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            first_name,
        }
    }

    /// Returns user id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the first name when known, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}
