//! Danger zone: bulk deletions behind a confirmation dialog.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use futures_util::future::BoxFuture;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracing::debug;

use crate::application::services::{
    ConfirmationController, DestructiveActionCatalog, DestructiveActionCategory, DialogVariant,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    AlertApiPort, HapticPort, ImpactStyle, LocaleProvider, NotificationKind,
};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{Card, ConfirmDialog, DialogLabels};

/// What the app should do after a key in the danger zone.
pub enum DangerKeyResult {
    /// Key handled.
    Consumed,
    /// Key not meant for this section.
    Ignored,
    /// Drive this future and hand its result to [`DangerZone::settle`].
    Run(BoxFuture<'static, Result<(), ApiError>>),
}

impl std::fmt::Debug for DangerKeyResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Consumed => write!(f, "Consumed"),
            Self::Ignored => write!(f, "Ignored"),
            Self::Run(_) => write!(f, "Run(..)"),
        }
    }
}

/// Destructive action cards and their shared confirmation dialog.
pub struct DangerZone {
    cursor: usize,
    confirmation: ConfirmationController,
    pending: Option<DestructiveActionCategory>,
    api: Arc<dyn AlertApiPort>,
    haptics: Arc<dyn HapticPort>,
    locale: Arc<dyn LocaleProvider>,
    labels: DialogLabels,
    theme: Theme,
}

impl DangerZone {
    /// Creates the section with every category listed.
    #[must_use]
    pub fn new(
        api: Arc<dyn AlertApiPort>,
        haptics: Arc<dyn HapticPort>,
        locale: Arc<dyn LocaleProvider>,
    ) -> Self {
        let labels = DialogLabels {
            confirm: locale.text("dialog.confirm", "Confirm").to_string(),
            cancel: locale.text("dialog.cancel", "Cancel").to_string(),
            working: locale.text("dialog.working", "Working...").to_string(),
        };

        Self {
            cursor: 0,
            confirmation: ConfirmationController::new(),
            pending: None,
            api,
            haptics,
            locale,
            labels,
            theme: Theme::default(),
        }
    }

    /// Returns the dialog controller.
    #[must_use]
    pub const fn confirmation(&self) -> &ConfirmationController {
        &self.confirmation
    }

    /// Returns whether a dialog is capturing input.
    #[must_use]
    pub fn is_modal(&self) -> bool {
        self.confirmation.is_open()
    }

    fn selected(&self) -> DestructiveActionCategory {
        DestructiveActionCategory::ALL[self.cursor.min(DestructiveActionCategory::ALL.len() - 1)]
    }

    /// Opens the dialog for `category`. Ignored while another one is pending.
    pub fn request(&mut self, category: DestructiveActionCategory) -> bool {
        let copy = DestructiveActionCatalog::describe(category).localized(self.locale.as_ref());
        let api = self.api.clone();
        let opened = self.confirmation.open(
            copy.title,
            copy.message,
            DialogVariant::Danger,
            move || category.execute(api),
        );
        if opened {
            self.pending = Some(category);
            self.haptics.impact(ImpactStyle::Medium);
        }
        opened
    }

    /// Handles key event, returns what the app should do.
    pub fn handle_key(&mut self, key: KeyEvent) -> DangerKeyResult {
        if self.confirmation.is_loading() {
            return DangerKeyResult::Consumed;
        }

        if self.confirmation.is_open() {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('n') => {
                    self.confirmation.cancel();
                    self.pending = None;
                    DangerKeyResult::Consumed
                }
                KeyCode::Enter | KeyCode::Char('y') => match self.confirmation.begin_confirm() {
                    Some(action) => {
                        self.haptics.impact(ImpactStyle::Heavy);
                        DangerKeyResult::Run(action)
                    }
                    None => DangerKeyResult::Consumed,
                },
                _ => DangerKeyResult::Consumed,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') if self.cursor > 0 => {
                self.cursor -= 1;
                self.haptics.selection_changed();
                DangerKeyResult::Consumed
            }
            KeyCode::Down | KeyCode::Char('j')
                if self.cursor + 1 < DestructiveActionCategory::ALL.len() =>
            {
                self.cursor += 1;
                self.haptics.selection_changed();
                DangerKeyResult::Consumed
            }
            KeyCode::Enter => {
                self.request(self.selected());
                DangerKeyResult::Consumed
            }
            _ => DangerKeyResult::Ignored,
        }
    }

    /// Closes the dialog after its action finished.
    ///
    /// Returns the settled category, or `None` when nothing was running.
    pub fn settle(&mut self, outcome: &Result<(), ApiError>) -> Option<DestructiveActionCategory> {
        if !self.confirmation.settle(outcome) {
            debug!("No confirmation in flight");
            return None;
        }

        self.haptics.notify(if outcome.is_ok() {
            NotificationKind::Success
        } else {
            NotificationKind::Error
        });
        self.pending.take()
    }
}

impl Widget for &DangerZone {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, list_area, hint_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(Span::styled(
            self.locale.text("danger.title", "Danger zone"),
            Style::default()
                .fg(self.theme.danger)
                .add_modifier(Modifier::BOLD),
        ))
        .render(title_area, buf);

        let rows = Layout::vertical(
            DestructiveActionCategory::ALL
                .iter()
                .map(|_| Constraint::Length(4)),
        )
        .split(list_area);

        for (i, (category, row)) in DestructiveActionCategory::ALL
            .iter()
            .zip(rows.iter())
            .enumerate()
        {
            let copy = DestructiveActionCatalog::describe(*category).localized(self.locale.as_ref());
            Card::new(vec![Line::from(Span::styled(
                copy.message,
                Style::default().fg(Color::Gray),
            ))])
            .title(copy.title)
            .highlighted(i == self.cursor)
            .accent(self.theme.danger)
            .render(*row, buf);
        }

        Paragraph::new(Span::styled(
            self.locale.text("danger.hint", "Enter select · ↑/↓ move"),
            self.theme.dimmed_style,
        ))
        .render(hint_area, buf);

        if let Some(request) = self.confirmation.request() {
            ConfirmDialog::new(request, &self.labels, &self.theme)
                .loading(self.confirmation.is_loading())
                .render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ConfirmationState;
    use crate::domain::ports::DefaultStrings;
    use crate::domain::ports::mocks::{Feedback, MockAlertApiPort, RecordingHaptics};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn zone(api: MockAlertApiPort) -> (DangerZone, Arc<RecordingHaptics>) {
        let haptics = Arc::new(RecordingHaptics::new());
        let zone = DangerZone::new(Arc::new(api), haptics.clone(), Arc::new(DefaultStrings));
        (zone, haptics)
    }

    #[tokio::test]
    async fn test_confirm_runs_selected_category() {
        let mut api = MockAlertApiPort::new();
        api.expect_delete_all_alerts().times(1).returning(|| Ok(()));
        let (mut zone, haptics) = zone(api);

        zone.handle_key(key(KeyCode::Down));
        zone.handle_key(key(KeyCode::Enter));
        assert_eq!(
            zone.confirmation().request().map(|r| r.title.as_str()),
            Some("Delete All Alerts")
        );

        let DangerKeyResult::Run(action) = zone.handle_key(key(KeyCode::Enter)) else {
            panic!("expected action");
        };
        assert!(zone.confirmation().is_loading());

        let outcome = action.await;
        assert_eq!(zone.settle(&outcome), Some(DestructiveActionCategory::Alerts));
        assert!(!zone.is_modal());
        assert_eq!(
            haptics.events(),
            vec![
                Feedback::Selection,
                Feedback::Impact(ImpactStyle::Medium),
                Feedback::Impact(ImpactStyle::Heavy),
                Feedback::Notify(NotificationKind::Success),
            ]
        );
    }

    #[test]
    fn test_cancel_never_calls_api() {
        let mut api = MockAlertApiPort::new();
        api.expect_clear_watchlist().never();
        let (mut zone, _) = zone(api);

        zone.handle_key(key(KeyCode::Enter));
        assert!(zone.is_modal());
        zone.handle_key(key(KeyCode::Esc));

        assert_eq!(zone.confirmation().state(), ConfirmationState::Closed);
    }

    #[test]
    fn test_loading_dialog_ignores_cancel_and_second_confirm() {
        let mut api = MockAlertApiPort::new();
        api.expect_clear_history().never();
        let (mut zone, _) = zone(api);

        zone.request(DestructiveActionCategory::History);
        let first = zone.handle_key(key(KeyCode::Enter));
        assert!(matches!(first, DangerKeyResult::Run(_)));

        assert!(matches!(zone.handle_key(key(KeyCode::Esc)), DangerKeyResult::Consumed));
        assert!(matches!(zone.handle_key(key(KeyCode::Enter)), DangerKeyResult::Consumed));
        assert!(zone.confirmation().is_loading());
        assert!(!zone.request(DestructiveActionCategory::Watchlist));
    }

    #[tokio::test]
    async fn test_failure_closes_dialog_with_error_haptic() {
        let mut api = MockAlertApiPort::new();
        api.expect_clear_watchlist()
            .returning(|| Err(ApiError::network("offline")));
        let (mut zone, haptics) = zone(api);

        zone.request(DestructiveActionCategory::Watchlist);
        let DangerKeyResult::Run(action) = zone.handle_key(key(KeyCode::Char('y'))) else {
            panic!("expected action");
        };
        let outcome = action.await;

        assert!(outcome.is_err());
        assert_eq!(zone.settle(&outcome), Some(DestructiveActionCategory::Watchlist));
        assert!(!zone.is_modal());
        assert_eq!(
            haptics.events().last(),
            Some(&Feedback::Notify(NotificationKind::Error))
        );
    }

    #[test]
    fn test_settle_without_pending_is_noop() {
        let (mut zone, haptics) = zone(MockAlertApiPort::new());
        assert_eq!(zone.settle(&Ok(())), None);
        assert!(haptics.events().is_empty());
    }
}
