//! Login screen.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::domain::ports::LocaleProvider;
use crate::presentation::widgets::{TextInput, Toggle};

/// Phase of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for a token.
    Input,
    /// Token sent, waiting for the backend.
    Validating,
    /// Last attempt failed; message shown.
    Error,
}

/// What the app should do after a key on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    /// Nothing.
    None,
    /// Validate the entered token.
    Submit,
    /// Forget the persisted token.
    DeleteToken,
    /// Exit the application.
    Quit,
}

/// Token entry shown whenever the gate redirects to login.
pub struct LoginScreen {
    token_input: TextInput,
    persist: Toggle,
    state: LoginState,
    error_message: Option<String>,
    locale: Arc<dyn LocaleProvider>,
}

impl LoginScreen {
    /// Creates an empty form.
    #[must_use]
    pub fn new(locale: Arc<dyn LocaleProvider>, persist_default: bool) -> Self {
        let mut token_input = TextInput::new(format!(
            " {} ",
            locale.text("login.prompt", "Session token")
        ))
        .password()
        .placeholder("ca_live_...");
        token_input.set_focused(true);

        Self {
            token_input,
            persist: Toggle::new(
                locale.text("login.remember", "Remember me (Tab)"),
                persist_default,
            ),
            state: LoginState::Input,
            error_message: None,
            locale,
        }
    }

    /// Returns the form phase.
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Returns entered token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let value = self.token_input.value().trim();
        (!value.is_empty()).then_some(value)
    }

    /// Returns whether the token should be remembered.
    #[must_use]
    pub const fn should_persist(&self) -> bool {
        self.persist.is_on()
    }

    /// Locks the form while the token is checked.
    pub fn set_validating(&mut self) {
        self.state = LoginState::Validating;
        self.error_message = None;
    }

    /// Shows a failure and unlocks the form.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
    }

    /// Clears the input and any message.
    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Validating {
            return LoginAction::None;
        }

        if key.code == KeyCode::Esc {
            return LoginAction::Quit;
        }

        if self.state == LoginState::Error {
            self.reset();
        }

        match key.code {
            KeyCode::Enter if self.token().is_some() => LoginAction::Submit,
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::ALT) => {
                LoginAction::DeleteToken
            }
            KeyCode::Tab => {
                self.persist.toggle();
                LoginAction::None
            }
            _ => {
                self.token_input.handle_key(&key);
                LoginAction::None
            }
        }
    }

    fn status_line(&self) -> Line<'_> {
        match self.state {
            LoginState::Input => Line::from(Span::styled(
                self.locale.text("login.hint", "Enter sign in · Esc quit"),
                Style::default().fg(Color::DarkGray),
            )),
            LoginState::Validating => Line::from(Span::styled(
                self.locale.text("login.validating", "Validating token..."),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Unknown error");
                Line::from(Span::styled(
                    format!("{}: {msg}", self.locale.text("login.failed", "Sign in failed")),
                    Style::default().fg(Color::Red),
                ))
            }
        }
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(
                " {} · {} ",
                self.locale.text("app.title", "CoinAlert"),
                self.locale.text("login.title", "Sign in")
            ));

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [_, input_area, _, persist_area, _, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        (&self.token_input).render(input_area, buf);
        (&self.persist).render(persist_area, buf);
        Paragraph::new(self.status_line()).render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::DefaultStrings;

    fn screen() -> LoginScreen {
        LoginScreen::new(Arc::new(DefaultStrings), true)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_initial_state() {
        let screen = screen();
        assert_eq!(screen.state(), LoginState::Input);
        assert!(screen.token().is_none());
        assert!(screen.should_persist());
    }

    #[test]
    fn test_typing() {
        let mut screen = screen();
        for c in "test".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(screen.token(), Some("test"));
    }

    #[test]
    fn test_toggle_persist() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Tab));
        assert!(!screen.should_persist());

        screen.handle_key(key(KeyCode::Tab));
        assert!(screen.should_persist());
    }

    #[test]
    fn test_submit_empty_is_ignored() {
        let mut screen = screen();
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
    }

    #[test]
    fn test_submit_with_token() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Char('x')));
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
    }

    #[test]
    fn test_validating_swallows_keys() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Char('x')));
        screen.set_validating();

        assert_eq!(screen.handle_key(key(KeyCode::Esc)), LoginAction::None);
        assert_eq!(screen.handle_key(key(KeyCode::Char('y'))), LoginAction::None);
        assert_eq!(screen.token(), Some("x"));
    }

    #[test]
    fn test_typing_clears_error() {
        let mut screen = screen();
        screen.set_error("Token rejected");
        screen.handle_key(key(KeyCode::Char('a')));

        assert_eq!(screen.state(), LoginState::Input);
        assert_eq!(screen.token(), Some("a"));
    }

    #[test]
    fn test_delete_token_and_quit() {
        let mut screen = screen();
        let event = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::ALT);
        assert_eq!(screen.handle_key(event), LoginAction::DeleteToken);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), LoginAction::Quit);
    }
}
