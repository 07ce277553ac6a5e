//! Confirmation dialog state machine.
//!
//! `Closed -> Open -> Confirming -> Closed`, or `Open -> Closed` on cancel.
//! At most one confirmation is pending at a time, the bound action runs at
//! most once, and nothing can dismiss the dialog while the action runs.

use std::future::Future;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, info, warn};

use crate::domain::errors::ApiError;

/// Deferred action guarded by the dialog.
pub type ConfirmAction = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), ApiError>> + Send>;

/// Visual severity of the dialog. Has no effect on the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogVariant {
    /// Neutral confirmation.
    #[default]
    Default,
    /// Reversible but notable.
    Warning,
    /// Irreversible.
    Danger,
}

/// Copy shown by an open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    /// Dialog title.
    pub title: String,
    /// Dialog body.
    pub message: String,
    /// Visual severity.
    pub variant: DialogVariant,
}

/// Lifecycle state of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    /// No dialog.
    #[default]
    Closed,
    /// Waiting for the user.
    Open,
    /// Action running.
    Confirming,
}

/// Serializes one pending confirmable action and the user's answer.
#[derive(Default)]
pub struct ConfirmationController {
    state: ConfirmationState,
    request: Option<ConfirmationRequest>,
    action: Option<ConfirmAction>,
}

impl ConfirmationController {
    /// Creates a closed controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for `action`.
    ///
    /// Returns false, leaving the pending dialog untouched, when one is
    /// already open or confirming.
    pub fn open<F, Fut>(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        variant: DialogVariant,
        action: F,
    ) -> bool
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ApiError>> + Send + 'static,
    {
        if self.state != ConfirmationState::Closed {
            debug!(state = ?self.state, "Confirmation already pending, ignoring open");
            return false;
        }

        let request = ConfirmationRequest {
            title: title.into(),
            message: message.into(),
            variant,
        };
        debug!(title = %request.title, variant = ?request.variant, "Opening confirmation");

        self.request = Some(request);
        self.action = Some(Box::new(move || action().boxed()));
        self.state = ConfirmationState::Open;
        true
    }

    /// Dismisses the dialog without running the action.
    ///
    /// Only valid while open; ignored while the action runs.
    pub fn cancel(&mut self) -> bool {
        if self.state != ConfirmationState::Open {
            return false;
        }

        debug!("Confirmation cancelled");
        self.close();
        true
    }

    /// Moves to `Confirming` and hands out the action's future.
    ///
    /// The caller drives the future and reports its outcome to
    /// [`Self::settle`]. Returns `None` unless the dialog is open.
    pub fn begin_confirm(&mut self) -> Option<BoxFuture<'static, Result<(), ApiError>>> {
        if self.state != ConfirmationState::Open {
            return None;
        }

        let action = self.action.take()?;
        self.state = ConfirmationState::Confirming;
        info!(
            title = self.request.as_ref().map_or("", |r| r.title.as_str()),
            "Running confirmed action"
        );
        Some(action())
    }

    /// Closes the dialog once the action has settled, whatever its outcome.
    pub fn settle(&mut self, outcome: &Result<(), ApiError>) -> bool {
        if self.state != ConfirmationState::Confirming {
            return false;
        }

        match outcome {
            Ok(()) => info!("Confirmed action completed"),
            Err(e) => warn!(error = %e, "Confirmed action failed"),
        }
        self.close();
        true
    }

    /// Runs the bound action to completion and closes the dialog.
    ///
    /// Returns the action's result for the caller to surface, or `None` when
    /// there was nothing to confirm.
    pub async fn confirm(&mut self) -> Option<Result<(), ApiError>> {
        let action = self.begin_confirm()?;
        let outcome = action.await;
        self.settle(&outcome);
        Some(outcome)
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ConfirmationState {
        self.state
    }

    /// Returns the dialog copy while open.
    #[must_use]
    pub const fn request(&self) -> Option<&ConfirmationRequest> {
        self.request.as_ref()
    }

    /// Returns whether a dialog is displayed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state != ConfirmationState::Closed
    }

    /// Returns whether the action is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == ConfirmationState::Confirming
    }

    /// Returns whether the close affordance is enabled.
    #[must_use]
    pub fn can_dismiss(&self) -> bool {
        self.state == ConfirmationState::Open
    }

    fn close(&mut self) {
        self.state = ConfirmationState::Closed;
        self.request = None;
        self.action = None;
    }
}

impl std::fmt::Debug for ConfirmationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationController")
            .field("state", &self.state)
            .field("request", &self.request)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_action(
        counter: &Arc<AtomicUsize>,
        outcome: Result<(), ApiError>,
    ) -> impl FnOnce() -> futures_util::future::Ready<Result<(), ApiError>> + Send + 'static {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            futures_util::future::ready(outcome)
        }
    }

    #[test]
    fn test_initial_state_is_closed() {
        let controller = ConfirmationController::new();
        assert_eq!(controller.state(), ConfirmationState::Closed);
        assert!(!controller.is_open());
        assert!(!controller.is_loading());
        assert!(controller.request().is_none());
    }

    #[test]
    fn test_open_exposes_request() {
        let mut controller = ConfirmationController::new();
        let counter = Arc::new(AtomicUsize::new(0));

        assert!(controller.open(
            "Clear Watchlist",
            "Remove every coin?",
            DialogVariant::Warning,
            counting_action(&counter, Ok(())),
        ));

        let request = controller.request().unwrap();
        assert_eq!(request.title, "Clear Watchlist");
        assert_eq!(request.variant, DialogVariant::Warning);
        assert!(controller.can_dismiss());
    }

    #[test]
    fn test_second_open_is_ignored() {
        let mut controller = ConfirmationController::new();
        let counter = Arc::new(AtomicUsize::new(0));

        controller.open("First", "a", DialogVariant::Default, counting_action(&counter, Ok(())));
        let reopened =
            controller.open("Second", "b", DialogVariant::Danger, counting_action(&counter, Ok(())));

        assert!(!reopened);
        assert_eq!(controller.request().unwrap().title, "First");
    }

    #[test]
    fn test_cancel_never_runs_action() {
        let mut controller = ConfirmationController::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            controller.open("Delete", "Sure?", DialogVariant::Danger, counting_action(&counter, Ok(())));
            assert!(controller.cancel());
            assert_eq!(controller.state(), ConfirmationState::Closed);
        }

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_when_closed_is_noop() {
        let mut controller = ConfirmationController::new();
        assert!(!controller.cancel());
    }

    #[tokio::test]
    async fn test_confirm_runs_action_once_and_closes() {
        let mut controller = ConfirmationController::new();
        let counter = Arc::new(AtomicUsize::new(0));
        controller.open("Clear History", "Sure?", DialogVariant::Danger, counting_action(&counter, Ok(())));

        let outcome = controller.confirm().await;

        assert_eq!(outcome, Some(Ok(())));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), ConfirmationState::Closed);

        assert_eq!(controller.confirm().await, None);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_action_still_closes_and_reports_error() {
        let mut controller = ConfirmationController::new();
        let counter = Arc::new(AtomicUsize::new(0));
        controller.open(
            "Delete All Alerts",
            "This cannot be undone.",
            DialogVariant::Danger,
            counting_action(&counter, Err(ApiError::network("connection reset"))),
        );

        let outcome = controller.confirm().await;

        assert_eq!(outcome, Some(Err(ApiError::network("connection reset"))));
        assert_eq!(controller.state(), ConfirmationState::Closed);
        assert!(!controller.is_loading());
        assert!(!controller.is_open());
    }

    #[tokio::test]
    async fn test_dialog_is_locked_while_confirming() {
        let mut controller = ConfirmationController::new();
        let counter = Arc::new(AtomicUsize::new(0));
        controller.open("Delete", "Sure?", DialogVariant::Danger, counting_action(&counter, Ok(())));

        let pending = controller.begin_confirm().unwrap();

        assert!(controller.is_loading());
        assert!(controller.is_open());
        assert!(!controller.can_dismiss());
        assert!(!controller.cancel());
        assert!(controller.begin_confirm().is_none());
        assert!(!controller.open("Other", "x", DialogVariant::Default, counting_action(&counter, Ok(()))));

        let outcome = pending.await;
        assert!(controller.settle(&outcome));

        assert_eq!(controller.state(), ConfirmationState::Closed);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_settle_without_confirming_is_ignored() {
        let mut controller = ConfirmationController::new();
        assert!(!controller.settle(&Ok(())));
    }
}
