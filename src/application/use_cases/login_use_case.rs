//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::application::services::SessionStore;
use crate::domain::entities::SessionToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, TokenStoragePort};

/// Handles user authentication workflow.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
    session_store: Arc<SessionStore>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn TokenStoragePort>,
        session_store: Arc<SessionStore>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
            session_store,
        }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if token is invalid or rejected.
    pub async fn execute(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        debug!(source = %request.source, "Attempting login");

        let token = SessionToken::new(&request.token).ok_or_else(|| {
            warn!("Invalid token format provided");
            AuthError::invalid_format("token is too short or contains whitespace")
        })?;

        let user = self.auth_port.validate_token(&token).await.map_err(|e| {
            warn!(error = %e, "Token validation failed");
            e
        })?;

        info!(
            user_id = %user.id(),
            username = %user.username(),
            "Successfully authenticated"
        );

        let token_persisted = if request.persist_token {
            match self.storage_port.store_token(&token).await {
                Ok(()) => {
                    info!("Token persisted");
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to persist token");
                    false
                }
            }
        } else {
            debug!("Token persistence disabled, skipping storage");
            false
        };

        self.session_store.login(token);

        Ok(LoginResponse::new(user, request.source, token_persisted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::TokenSource;
    use crate::domain::ports::mocks::{MockAuthPort, MockTokenStorage};

    const TOKEN: &str = "user42:9f8e7d6c5b4a39281706";

    fn use_case(
        succeed: bool,
        storage: Arc<MockTokenStorage>,
    ) -> (LoginUseCase, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::new());
        let use_case = LoginUseCase::new(Arc::new(MockAuthPort::new(succeed)), storage, store.clone());
        (use_case, store)
    }

    #[tokio::test]
    async fn test_successful_login() {
        let storage = Arc::new(MockTokenStorage::new());
        let (use_case, store) = use_case(true, storage.clone());

        let response = use_case
            .execute(LoginRequest::new(TOKEN.to_string(), TokenSource::UserInput))
            .await
            .unwrap();

        assert_eq!(response.user.username(), "testuser");
        assert!(response.token_persisted);
        assert!(storage.has_token().await.unwrap());
        assert!(store.current().is_authenticated());
    }

    #[tokio::test]
    async fn test_invalid_token_format() {
        let (use_case, store) = use_case(true, Arc::new(MockTokenStorage::new()));

        let result = use_case
            .execute(LoginRequest::new("invalid".to_string(), TokenSource::UserInput))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidTokenFormat { .. })));
        assert!(!store.current().has_token());
    }

    #[tokio::test]
    async fn test_rejected_token() {
        let (use_case, store) = use_case(false, Arc::new(MockTokenStorage::new()));

        let result = use_case
            .execute(LoginRequest::new(TOKEN.to_string(), TokenSource::UserInput))
            .await;

        assert!(matches!(result, Err(AuthError::TokenRejected { .. })));
        assert!(!store.current().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_without_persistence() {
        let storage = Arc::new(MockTokenStorage::new());
        let (use_case, store) = use_case(true, storage.clone());

        let request =
            LoginRequest::new(TOKEN.to_string(), TokenSource::CommandLine).without_persistence();
        let response = use_case.execute(request).await.unwrap();

        assert!(!response.token_persisted);
        assert!(!storage.has_token().await.unwrap());
        assert!(store.current().is_authenticated());
    }
}
