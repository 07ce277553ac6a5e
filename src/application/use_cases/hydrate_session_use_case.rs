//! Session hydration at startup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::TokenSource;
use crate::application::services::SessionStore;
use crate::domain::entities::SessionToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::TokenStoragePort;

/// Token found at startup with its source.
#[derive(Debug, Clone)]
pub struct ResolvedToken {
    /// The session token.
    pub token: SessionToken,
    /// Source of the token.
    pub source: TokenSource,
}

impl ResolvedToken {
    /// Creates new resolved token.
    #[must_use]
    pub const fn new(token: SessionToken, source: TokenSource) -> Self {
        Self { token, source }
    }
}

/// Finds persisted credentials and installs them, unvalidated, in the store.
pub struct HydrateSessionUseCase {
    storage_port: Arc<dyn TokenStoragePort>,
    session_store: Arc<SessionStore>,
}

impl HydrateSessionUseCase {
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

    /// Resolves a token and hydrates the session store with it.
    ///
    /// Priority:
    /// 1. Persisted session
    /// 2. CLI/Env (passed as argument)
    ///
    /// # Errors
    /// Currently infallible; storage failures fall through to the next source.
    pub async fn execute(
        &self,
        cli_token: Option<String>,
    ) -> Result<Option<ResolvedToken>, AuthError> {
        let resolved = self.resolve(cli_token).await;

        match &resolved {
            Some(found) => {
                info!(source = %found.source, "Hydrating session");
                self.session_store.hydrate(found.token.clone());
            }
            None => debug!("No token found in any source"),
        }

        Ok(resolved)
    }

    async fn resolve(&self, cli_token: Option<String>) -> Option<ResolvedToken> {
        debug!("Checking persisted session");
        match self.storage_port.get_token().await {
            Ok(Some(token)) => {
                return Some(ResolvedToken::new(token, TokenSource::Storage));
            }
            Ok(None) => debug!("No persisted session"),
            Err(e) => debug!(error = %e, "Failed to read persisted session"),
        }

        let token_str = cli_token.filter(|s| !s.trim().is_empty())?;
        debug!("Checking command-line/env token");
        let token = SessionToken::new(&token_str);
        if token.is_none() {
            debug!("Command-line token has invalid format");
        }
        token.map(|token| ResolvedToken::new(token, TokenSource::CommandLine))
    }
}
