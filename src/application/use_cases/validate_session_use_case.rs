//! Validation of a hydrated session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::SessionStore;
use crate::domain::entities::User;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, TokenStoragePort};

/// Confirms the pending token with the backend and resolves the session.
#[derive(Clone)]
pub struct ValidateSessionUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
    session_store: Arc<SessionStore>,
}

impl ValidateSessionUseCase {
    /// Creates new use case.
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

    /// Validates the token currently in the store.
    ///
    /// Any failure leaves the session unauthenticated. A token the server
    /// refused is also removed from storage; one that could not be checked
    /// because of the network is kept for the next launch.
    ///
    /// # Errors
    /// Returns [`AuthError::NoTokenAvailable`] without a pending token, or
    /// the validation failure.
    pub async fn execute(&self) -> Result<User, AuthError> {
        let session = self.session_store.current();
        let Some(token) = session.token().cloned() else {
            return Err(AuthError::NoTokenAvailable);
        };

        debug!(token = %token, "Validating session");
        let result = self.auth_port.validate_token(&token).await;

        match result {
            Ok(user) => {
                if !self.session_store.mark_validated(&token) {
                    debug!("Session changed during validation, discarding result");
                    return Ok(user);
                }
                info!(user_id = %user.id(), username = %user.username(), "Session validated");
                Ok(user)
            }
            Err(e) => {
                if !self.session_store.mark_rejected(&token) {
                    debug!("Session changed during validation, discarding result");
                    return Err(e);
                }
                warn!(error = %e, "Session validation failed");
                if e.is_rejection() {
                    if let Err(delete_err) = self.storage_port.delete_token().await {
                        warn!(error = %delete_err, "Failed to delete rejected token");
                    }
                }
                Err(e)
            }
        }
    }
}
