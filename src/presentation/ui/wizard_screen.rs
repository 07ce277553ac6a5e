//! Alert creation wizard screen.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracing::{debug, warn};

use crate::application::services::{
    AlertOptions, CoinSearch, ConditionInput, DEFAULT_STEP_LABELS, MAX_NOTE_LENGTH, StepData,
    WizardController, WizardStep,
};
use crate::domain::entities::{Alert, AlertType, Coin, NewAlert, default_coins};
use crate::domain::errors::{ApiError, WizardError};
use crate::domain::ports::{HapticPort, ImpactStyle, LocaleProvider};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{Card, StepIndicator, TextInput, Toggle};

const VISIBLE_COINS: usize = 6;

/// What the app should do after a key in the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardKeyResult {
    /// Key handled.
    Consumed,
    /// Key not meant for the wizard.
    Ignored,
    /// Send this payload and report back through [`WizardScreen::finish_submit`].
    Submit(NewAlert),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmFocus {
    Repeat,
    Note,
}

/// Alert wizard view with one input per step.
pub struct WizardScreen {
    controller: WizardController,
    search: CoinSearch,
    search_input: TextInput,
    coin_cursor: usize,
    type_cursor: usize,
    threshold_input: TextInput,
    repeat: Toggle,
    note_input: TextInput,
    confirm_focus: ConfirmFocus,
    notice: Option<String>,
    haptics: Arc<dyn HapticPort>,
    locale: Arc<dyn LocaleProvider>,
    theme: Theme,
}

impl WizardScreen {
    /// Creates the wizard with localized step labels.
    #[must_use]
    pub fn new(locale: Arc<dyn LocaleProvider>, haptics: Arc<dyn HapticPort>) -> Self {
        let labels = WizardStep::ALL
            .iter()
            .zip(DEFAULT_STEP_LABELS)
            .map(|(step, default)| locale.text(step.locale_key(), default).to_string());
        let controller = WizardController::with_labels(labels)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default step labels");
                WizardController::new()
            })
            .with_haptics(haptics.clone());

        let mut search_input =
            TextInput::new(format!(" {} ", locale.text("wizard.search", "Search coin")));
        search_input.set_focused(true);
        let mut threshold_input =
            TextInput::new(format!(" {} ", locale.text("wizard.threshold", "Threshold")))
                .placeholder("0.00");
        threshold_input.set_focused(true);
        let note_input = TextInput::new(format!(" {} ", locale.text("wizard.note", "Note")))
            .max_chars(MAX_NOTE_LENGTH);
        let repeat = Toggle::new(
            locale.text("wizard.repeating", "Repeat after firing"),
            false,
        );

        let mut screen = Self {
            controller,
            search: CoinSearch::new(default_coins()),
            search_input,
            coin_cursor: 0,
            type_cursor: 0,
            threshold_input,
            repeat,
            note_input,
            confirm_focus: ConfirmFocus::Repeat,
            notice: None,
            haptics,
            locale,
            theme: Theme::default(),
        };
        screen.focus_confirm(ConfirmFocus::Repeat);
        screen
    }

    /// Returns the step controller.
    #[must_use]
    pub const fn controller(&self) -> &WizardController {
        &self.controller
    }

    fn matches(&self) -> Vec<&Coin> {
        self.search.search(self.search_input.value())
    }

    fn selected_coin(&self) -> Option<Coin> {
        let matches = self.matches();
        if let Some(coin) = matches.get(self.coin_cursor) {
            return Some((*coin).clone());
        }
        let query = self.search_input.value().trim();
        (!query.is_empty()).then(|| Coin::new(query, query.to_uppercase()))
    }

    fn focus_confirm(&mut self, focus: ConfirmFocus) {
        self.confirm_focus = focus;
        self.repeat.set_focused(focus == ConfirmFocus::Repeat);
        self.note_input.set_focused(focus == ConfirmFocus::Note);
    }

    fn options(&self) -> AlertOptions {
        AlertOptions {
            repeating: self.repeat.is_on(),
            note: self.note_input.value().to_string(),
        }
    }

    fn move_cursor(cursor: &mut usize, len: usize, down: bool) -> bool {
        if len == 0 {
            return false;
        }
        let next = if down {
            (*cursor + 1).min(len - 1)
        } else {
            cursor.saturating_sub(1)
        };
        let moved = next != *cursor;
        *cursor = next;
        moved
    }

    /// Handles key event, returns what the app should do.
    pub fn handle_key(&mut self, key: KeyEvent) -> WizardKeyResult {
        if self.controller.is_submitting() {
            return WizardKeyResult::Consumed;
        }

        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.reset();
            return WizardKeyResult::Consumed;
        }

        match key.code {
            KeyCode::Esc => {
                self.notice = None;
                if let Err(e) = self.controller.retreat() {
                    debug!(error = %e, "Cannot go back");
                    return WizardKeyResult::Ignored;
                }
                WizardKeyResult::Consumed
            }
            KeyCode::Enter => self.submit_step(),
            _ => {
                self.handle_step_key(&key);
                WizardKeyResult::Consumed
            }
        }
    }

    fn submit_step(&mut self) -> WizardKeyResult {
        let step = self.controller.current_step();
        match step {
            WizardStep::Coin => {
                if let Some(coin) = self.selected_coin() {
                    self.update_step(StepData::Coin(coin));
                }
            }
            WizardStep::Type => {
                let alert_type = AlertType::ALL[self.type_cursor.min(AlertType::ALL.len() - 1)];
                self.update_step(StepData::Type(alert_type));
            }
            WizardStep::Condition => {}
            WizardStep::Confirm => {
                return match self.controller.begin_submit() {
                    Ok(payload) => {
                        self.notice = None;
                        WizardKeyResult::Submit(payload)
                    }
                    Err(e) => {
                        self.notice = Some(e.to_string());
                        WizardKeyResult::Consumed
                    }
                };
            }
        }

        match self.controller.advance() {
            Ok(_) => self.notice = None,
            Err(WizardError::StepInvalid { .. }) => {
                self.notice = Some(
                    self.locale
                        .text("wizard.invalid_step", "Complete this step first")
                        .to_string(),
                );
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
        WizardKeyResult::Consumed
    }

    fn update_step(&mut self, data: StepData) {
        if let Err(e) = self.controller.set_step_data(data) {
            debug!(error = %e, "Step input ignored");
        }
    }

    fn handle_step_key(&mut self, key: &KeyEvent) {
        match self.controller.current_step() {
            WizardStep::Coin => match key.code {
                KeyCode::Up | KeyCode::Down => {
                    let len = self.matches().len().min(VISIBLE_COINS);
                    if Self::move_cursor(&mut self.coin_cursor, len, key.code == KeyCode::Down) {
                        self.haptics.selection_changed();
                    }
                }
                _ => {
                    if self.search_input.handle_key(key) {
                        self.coin_cursor = 0;
                    }
                }
            },
            WizardStep::Type => {
                let down = match key.code {
                    KeyCode::Down => true,
                    KeyCode::Up => false,
                    _ => return,
                };
                if Self::move_cursor(&mut self.type_cursor, AlertType::ALL.len(), down) {
                    self.haptics.selection_changed();
                }
            }
            WizardStep::Condition => {
                if self.threshold_input.handle_key(key) {
                    let input = ConditionInput::new(self.threshold_input.value());
                    self.update_step(StepData::Condition(input));
                }
            }
            WizardStep::Confirm => match (key.code, self.confirm_focus) {
                (KeyCode::Up, _) => self.focus_confirm(ConfirmFocus::Repeat),
                (KeyCode::Down, _) => self.focus_confirm(ConfirmFocus::Note),
                (KeyCode::Char(' '), ConfirmFocus::Repeat) => {
                    self.repeat.toggle();
                    self.haptics.impact(ImpactStyle::Light);
                    self.update_step(StepData::Confirm(self.options()));
                }
                (_, ConfirmFocus::Note) => {
                    if self.note_input.handle_key(key) {
                        self.update_step(StepData::Confirm(self.options()));
                    }
                }
                _ => {}
            },
        }
    }

    /// Applies the backend answer to a pending submission.
    ///
    /// # Errors
    /// Returns the submission failure; the wizard stays on the last step.
    pub fn finish_submit(&mut self, result: Result<Alert, ApiError>) -> Result<Alert, WizardError> {
        let outcome = self.controller.finish_submit(result);
        if outcome.is_ok() {
            self.clear_inputs();
        }
        outcome
    }

    /// Cancels the wizard, discarding everything entered.
    pub fn reset(&mut self) {
        if let Err(e) = self.controller.reset() {
            debug!(error = %e, "Reset refused");
            return;
        }
        self.clear_inputs();
    }

    fn clear_inputs(&mut self) {
        self.search_input.clear();
        self.threshold_input.clear();
        self.note_input.clear();
        self.repeat.set(false);
        self.coin_cursor = 0;
        self.type_cursor = 0;
        self.notice = None;
        self.focus_confirm(ConfirmFocus::Repeat);
    }

    fn option_lines<'a>(&self, items: impl Iterator<Item = String>, cursor: usize) -> Vec<Line<'a>> {
        items
            .enumerate()
            .map(|(i, text)| {
                if i == cursor {
                    Line::from(Span::styled(format!("› {text}"), self.theme.selection_style))
                } else {
                    Line::from(format!("  {text}"))
                }
            })
            .collect()
    }

    fn review_lines(&self) -> Vec<Line<'static>> {
        let draft = self.controller.draft();
        let label = |step: WizardStep| self.controller.label(step).to_string();
        let coin = draft.coin.as_ref().map_or_else(String::new, ToString::to_string);
        let alert_type = draft.alert_type.map_or_else(String::new, |t| {
            self.locale.text(t.locale_key(), t.label()).to_string()
        });
        let threshold = match (draft.condition.as_ref(), draft.alert_type) {
            (Some(c), Some(t)) => format!("{} {}", c.raw.trim(), t.unit()),
            _ => String::new(),
        };

        [
            (label(WizardStep::Coin), coin),
            (label(WizardStep::Type), alert_type),
            (label(WizardStep::Condition), threshold),
        ]
        .into_iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(format!("{name}: "), self.theme.dimmed_style),
                Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect()
    }

    fn render_step(&self, area: Rect, buf: &mut Buffer) {
        let step = self.controller.current_step();
        let title = self.controller.label(step).to_string();

        match step {
            WizardStep::Coin => {
                let [input_area, list_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
                (&self.search_input).render(input_area, buf);
                let items = self
                    .matches()
                    .into_iter()
                    .take(VISIBLE_COINS)
                    .map(ToString::to_string);
                Card::new(self.option_lines(items, self.coin_cursor))
                    .title(title)
                    .highlighted(true)
                    .accent(self.theme.accent)
                    .render(list_area, buf);
            }
            WizardStep::Type => {
                let items = AlertType::ALL
                    .iter()
                    .map(|t| self.locale.text(t.locale_key(), t.label()).to_string());
                Card::new(self.option_lines(items, self.type_cursor))
                    .title(title)
                    .highlighted(true)
                    .accent(self.theme.accent)
                    .render(area, buf);
            }
            WizardStep::Condition => {
                let [input_area, hint_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);
                (&self.threshold_input).render(input_area, buf);
                let unit = self.controller.draft().alert_type.map_or("", AlertType::unit);
                Paragraph::new(Span::styled(unit, self.theme.dimmed_style))
                    .render(hint_area, buf);
            }
            WizardStep::Confirm => {
                let [review_area, repeat_area, _, note_area] = Layout::vertical([
                    Constraint::Length(5),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(3),
                ])
                .areas(area);
                Card::new(self.review_lines())
                    .title(title)
                    .accent(self.theme.accent)
                    .render(review_area, buf);
                (&self.repeat).render(repeat_area, buf);
                (&self.note_input).render(note_area, buf);
            }
        }
    }

    fn footer_line(&self) -> Line<'_> {
        if self.controller.is_submitting() {
            return Line::from(Span::styled(
                self.locale.text("wizard.submitting", "Creating alert..."),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        if let Some(error) = self.controller.last_error() {
            return Line::from(Span::styled(
                format!(
                    "{}: {error}",
                    self.locale.text("wizard.failed", "Could not create alert")
                ),
                Style::default().fg(Color::Red),
            ));
        }
        if let Some(notice) = &self.notice {
            return Line::from(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Yellow),
            ));
        }

        let action = if self.controller.current_step() == WizardStep::Confirm {
            self.locale.text("wizard.submit", "Create alert")
        } else {
            self.locale.text("wizard.next", "Next")
        };
        Line::from(vec![
            Span::styled(format!("Enter {action}"), self.theme.dimmed_style),
            Span::styled(" · ", self.theme.dimmed_style),
            Span::styled(
                self.locale.text("wizard.hint", "Esc back · Ctrl+R reset"),
                self.theme.dimmed_style,
            ),
        ])
    }
}

impl Widget for &WizardScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [progress_area, _, body_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        StepIndicator::new(
            self.controller.labels(),
            self.controller.current_step().index(),
            self.controller.progress_fraction(),
        )
        .accent(self.theme.accent)
        .render(progress_area, buf);

        self.render_step(body_area, buf);
        Paragraph::new(self.footer_line()).render(footer_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::DefaultStrings;
    use crate::domain::ports::mocks::{Feedback, RecordingHaptics};
    use chrono::Utc;

    fn screen() -> (WizardScreen, Arc<RecordingHaptics>) {
        let haptics = Arc::new(RecordingHaptics::new());
        let screen = WizardScreen::new(Arc::new(DefaultStrings), haptics.clone());
        (screen, haptics)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut WizardScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn walk_to_confirm(screen: &mut WizardScreen) {
        type_text(screen, "eth");
        screen.handle_key(key(KeyCode::Enter));
        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Enter));
        type_text(screen, "2500");
        screen.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_full_walk_builds_payload() {
        let (mut screen, haptics) = screen();
        walk_to_confirm(&mut screen);
        assert_eq!(screen.controller().current_step(), WizardStep::Confirm);

        screen.handle_key(key(KeyCode::Char(' ')));
        let WizardKeyResult::Submit(payload) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected submit");
        };

        assert_eq!(payload.symbol, "ETH");
        assert_eq!(payload.alert_type, AlertType::PriceBelow);
        assert!((payload.threshold - 2500.0).abs() < f64::EPSILON);
        assert!(payload.repeating);
        assert!(screen.controller().is_submitting());
        assert!(haptics.events().contains(&Feedback::Selection));
    }

    #[test]
    fn test_invalid_step_shows_notice_and_stays() {
        let (mut screen, _) = screen();
        type_text(&mut screen, "q");
        screen.handle_key(key(KeyCode::Enter));

        assert_eq!(screen.controller().current_step(), WizardStep::Coin);
        assert!(screen.notice.is_some());
    }

    #[test]
    fn test_keys_ignored_while_submitting() {
        let (mut screen, _) = screen();
        walk_to_confirm(&mut screen);
        screen.handle_key(key(KeyCode::Enter));

        assert_eq!(screen.handle_key(key(KeyCode::Esc)), WizardKeyResult::Consumed);
        assert_eq!(screen.controller().current_step(), WizardStep::Confirm);
    }

    #[test]
    fn test_failed_submit_keeps_inputs() {
        let (mut screen, _) = screen();
        walk_to_confirm(&mut screen);
        screen.handle_key(key(KeyCode::Enter));

        let result = screen.finish_submit(Err(ApiError::network("down")));

        assert!(result.is_err());
        assert_eq!(screen.controller().current_step(), WizardStep::Confirm);
        assert_eq!(screen.threshold_input.value(), "2500");
    }

    #[test]
    fn test_successful_submit_clears_inputs() {
        let (mut screen, _) = screen();
        walk_to_confirm(&mut screen);
        let WizardKeyResult::Submit(payload) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected submit");
        };

        let alert = Alert {
            id: "a1".to_string(),
            symbol: payload.symbol,
            alert_type: payload.alert_type,
            threshold: payload.threshold,
            repeating: payload.repeating,
            note: payload.note,
            created_at: Utc::now(),
        };
        screen.finish_submit(Ok(alert)).unwrap();

        assert_eq!(screen.controller().current_step(), WizardStep::Coin);
        assert!(screen.search_input.value().is_empty());
        assert!(screen.threshold_input.value().is_empty());
    }

    #[test]
    fn test_default_labels_and_note_limit() {
        let (mut screen, _) = screen();
        assert_eq!(screen.controller().labels(), DEFAULT_STEP_LABELS);

        walk_to_confirm(&mut screen);
        screen.handle_key(key(KeyCode::Down));
        type_text(&mut screen, &"x".repeat(MAX_NOTE_LENGTH + 10));

        assert_eq!(screen.note_input.value().chars().count(), MAX_NOTE_LENGTH);
        assert_eq!(
            screen.controller().draft().options.note.chars().count(),
            MAX_NOTE_LENGTH
        );
        assert!(screen.controller().is_step_valid(WizardStep::Confirm));
    }

    #[test]
    fn test_reset_ignored_while_submitting() {
        let (mut screen, _) = screen();
        walk_to_confirm(&mut screen);
        screen.handle_key(key(KeyCode::Enter));

        screen.reset();
        screen.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));

        assert!(screen.controller().is_submitting());
        assert_eq!(screen.controller().current_step(), WizardStep::Confirm);
        assert_eq!(screen.threshold_input.value(), "2500");
    }

    #[test]
    fn test_escape_on_first_step_is_ignored() {
        let (mut screen, _) = screen();
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), WizardKeyResult::Ignored);
    }
}
