//! File-based token storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::domain::entities::SessionToken;
use crate::domain::errors::AuthError;
use crate::domain::ports::TokenStoragePort;
use crate::infrastructure::config::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::infrastructure::config::storage::save_atomically;

const SESSION_FILE_NAME: &str = "session.toml";

#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

impl Drop for SessionFile {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}

/// Stores the session token in the user's data directory.
///
/// The file is written through a `tempfile` temp file, which is created
/// readable by the owner only.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates storage at the default data directory.
    ///
    /// # Errors
    /// Returns error if the data directory cannot be determined.
    pub fn new() -> Result<Self, AuthError> {
        let dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| AuthError::retrieval_failed("failed to determine data directory"))?;
        Ok(Self::with_dir(dir))
    }

    /// Creates storage inside `dir`.
    #[must_use]
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE_NAME),
        }
    }

    /// Returns the session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn get_token(&self) -> Result<Option<SessionToken>, AuthError> {
        debug!(path = ?self.path, "Reading stored session");

        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No stored session");
                return Ok(None);
            }
            Err(e) => {
                warn!(error = %e, "Failed to read session file");
                return Err(AuthError::retrieval_failed(e.to_string()));
            }
        };

        match toml::from_str::<SessionFile>(&content) {
            Ok(file) => Ok(SessionToken::new(&file.token)),
            Err(e) => {
                warn!(error = %e, "Session file is malformed, ignoring it");
                Ok(None)
            }
        }
    }

    async fn store_token(&self, token: &SessionToken) -> Result<(), AuthError> {
        debug!(path = ?self.path, "Storing session");

        let file = SessionFile {
            token: token.as_str().to_string(),
        };
        let mut content = toml::to_string(&file)
            .map_err(|e| AuthError::storage_failed(format!("failed to encode session: {e}")))?;

        let result = async {
            if let Some(parent) = self.path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            save_atomically(&self.path, &content)
        }
        .await;
        content.zeroize();

        result.map_err(|e| {
            warn!(error = %e, "Failed to store session");
            AuthError::storage_failed(e.to_string())
        })
    }

    async fn delete_token(&self) -> Result<(), AuthError> {
        debug!(path = ?self.path, "Deleting stored session");

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No session to delete");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete session file");
                Err(AuthError::storage_failed(e.to_string()))
            }
        }
    }
}
