//! Alerts backend port definition.

use async_trait::async_trait;

use crate::domain::entities::{Alert, NewAlert};
use crate::domain::errors::ApiError;

/// Port for alert creation and the destructive bulk operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertApiPort: Send + Sync {
    /// Creates a new alert.
    async fn create_alert(&self, alert: &NewAlert) -> Result<Alert, ApiError>;

    /// Removes every coin from the watchlist.
    async fn clear_watchlist(&self) -> Result<(), ApiError>;

    /// Deletes every alert.
    async fn delete_all_alerts(&self) -> Result<(), ApiError>;

    /// Deletes the triggered-alert history.
    async fn clear_history(&self) -> Result<(), ApiError>;
}
