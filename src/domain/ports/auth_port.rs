//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::{SessionToken, User};
use crate::domain::errors::AuthError;

/// Port for session validation against the backend.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Validates token and returns user information.
    async fn validate_token(&self, token: &SessionToken) -> Result<User, AuthError>;
}
