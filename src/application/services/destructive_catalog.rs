//! Copy and backend calls for the danger-zone actions.

use std::sync::Arc;

use crate::domain::errors::ApiError;
use crate::domain::ports::{AlertApiPort, LocaleProvider};

/// Bulk operations that cannot be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestructiveActionCategory {
    /// Remove every watched coin.
    Watchlist,
    /// Delete every alert.
    Alerts,
    /// Delete triggered-alert history.
    History,
}

impl DestructiveActionCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Watchlist, Self::Alerts, Self::History];

    /// Runs the backend operation this category stands for.
    ///
    /// # Errors
    /// Returns whatever the backend reports.
    pub async fn execute(self, api: Arc<dyn AlertApiPort>) -> Result<(), ApiError> {
        match self {
            Self::Watchlist => api.clear_watchlist().await,
            Self::Alerts => api.delete_all_alerts().await,
            Self::History => api.clear_history().await,
        }
    }
}

/// Dialog copy for one category, with locale keys and English defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCopy {
    /// English title.
    pub title: &'static str,
    /// English body.
    pub message: &'static str,
    /// Locale key of the title.
    pub title_key: &'static str,
    /// Locale key of the body.
    pub message_key: &'static str,
}

/// Copy resolved against a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedCopy {
    /// Dialog title.
    pub title: String,
    /// Dialog body.
    pub message: String,
}

impl ActionCopy {
    /// Resolves title and message, falling back to English.
    #[must_use]
    pub fn localized(&self, locale: &dyn LocaleProvider) -> LocalizedCopy {
        LocalizedCopy {
            title: locale.text(self.title_key, self.title).to_string(),
            message: locale.text(self.message_key, self.message).to_string(),
        }
    }
}

/// Static lookup from category to copy.
pub struct DestructiveActionCatalog;

impl DestructiveActionCatalog {
    /// Returns the copy for `category`.
    #[must_use]
    pub const fn describe(category: DestructiveActionCategory) -> ActionCopy {
        match category {
            DestructiveActionCategory::Watchlist => ActionCopy {
                title: "Clear Watchlist",
                message: "Are you sure you want to remove all coins from your watchlist? This action cannot be undone.",
                title_key: "danger.watchlist.title",
                message_key: "danger.watchlist.message",
            },
            DestructiveActionCategory::Alerts => ActionCopy {
                title: "Delete All Alerts",
                message: "Are you sure you want to delete all your price alerts? This action cannot be undone.",
                title_key: "danger.alerts.title",
                message_key: "danger.alerts.message",
            },
            DestructiveActionCategory::History => ActionCopy {
                title: "Clear History",
                message: "Are you sure you want to clear your alert history? This action cannot be undone.",
                title_key: "danger.history.title",
                message_key: "danger.history.message",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::DefaultStrings;
    use crate::domain::ports::mocks::MockAlertApiPort;

    struct Russian;

    impl LocaleProvider for Russian {
        fn lookup(&self, key: &str) -> Option<&str> {
            match key {
                "danger.alerts.title" => Some("Удалить все оповещения"),
                _ => None,
            }
        }
    }

    #[test]
    fn test_every_category_has_copy() {
        for category in DestructiveActionCategory::ALL {
            let copy = DestructiveActionCatalog::describe(category);
            assert!(!copy.title.is_empty());
            assert!(copy.message.contains("cannot be undone"));
        }
    }

    #[test]
    fn test_alerts_copy() {
        let copy = DestructiveActionCatalog::describe(DestructiveActionCategory::Alerts);
        assert_eq!(copy.title, "Delete All Alerts");
    }

    #[test]
    fn test_localized_copy_falls_back_per_field() {
        let copy = DestructiveActionCatalog::describe(DestructiveActionCategory::Alerts);

        let localized = copy.localized(&Russian);
        assert_eq!(localized.title, "Удалить все оповещения");
        assert_eq!(localized.message, copy.message);

        let english = copy.localized(&DefaultStrings);
        assert_eq!(english.title, copy.title);
    }

    #[tokio::test]
    async fn test_execute_dispatches_to_matching_call() {
        let mut api = MockAlertApiPort::new();
        api.expect_delete_all_alerts().times(1).returning(|| Ok(()));
        api.expect_clear_watchlist().never();
        api.expect_clear_history()
            .times(1)
            .returning(|| Err(ApiError::Unauthorized));

        let api: Arc<dyn AlertApiPort> = Arc::new(api);

        assert!(
            DestructiveActionCategory::Alerts
                .execute(Arc::clone(&api))
                .await
                .is_ok()
        );
        assert_eq!(
            DestructiveActionCategory::History.execute(api).await,
            Err(ApiError::Unauthorized)
        );
    }
}
