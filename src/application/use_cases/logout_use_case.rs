//! Logout use case implementation.

use std::sync::Arc;

use tracing::{error, info};

use crate::application::services::SessionStore;
use crate::domain::errors::AuthError;
use crate::domain::ports::TokenStoragePort;

/// Forgets the persisted token and tears the session down.
#[derive(Clone)]
pub struct LogoutUseCase {
    storage_port: Arc<dyn TokenStoragePort>,
    session_store: Arc<SessionStore>,
}

impl LogoutUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        storage_port: Arc<dyn TokenStoragePort>,
        session_store: Arc<SessionStore>,
    ) -> Self {
        Self {
            storage_port,
            session_store,
        }
    }

    /// Logs out. The in-memory session is cleared even when deleting the
    /// persisted token fails.
    ///
    /// # Errors
    /// Returns error if the persisted token could not be deleted.
    pub async fn execute(&self) -> Result<(), AuthError> {
        self.session_store.logout();

        match self.storage_port.delete_token().await {
            Ok(()) => {
                info!("Logged out");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to delete persisted token");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SessionToken;
    use crate::domain::ports::mocks::MockTokenStorage;

    #[tokio::test]
    async fn test_logout_clears_store_and_storage() {
        let token = SessionToken::new_unchecked("user42:9f8e7d6c5b4a39281706");
        let storage = Arc::new(MockTokenStorage::with_token(token.clone()));
        let store = Arc::new(SessionStore::new());
        store.login(token);

        LogoutUseCase::new(storage.clone(), store.clone())
            .execute()
            .await
            .unwrap();

        assert!(!store.current().has_token());
        assert!(!storage.has_token().await.unwrap());
    }
}
