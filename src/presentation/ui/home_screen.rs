//! Authenticated surface: the alert wizard and the danger zone.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures_util::future::BoxFuture;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
};

use super::danger_zone::{DangerKeyResult, DangerZone};
use super::wizard_screen::{WizardKeyResult, WizardScreen};
use crate::domain::entities::{NewAlert, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AlertApiPort, HapticPort, LocaleProvider};
use crate::presentation::theme::Theme;

/// Part of the home screen holding focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Alert creation.
    Wizard,
    /// Destructive actions.
    Danger,
}

/// What the app should do after a key on the home screen.
pub enum HomeKeyResult {
    /// Key handled.
    Consumed,
    /// Sign the user out.
    Logout,
    /// Create this alert.
    Submit(NewAlert),
    /// Drive this destructive request.
    Run(BoxFuture<'static, Result<(), ApiError>>),
}

/// Signed-in view: the wizard and the danger zone.
pub struct HomeScreen {
    section: Section,
    wizard: WizardScreen,
    danger: DangerZone,
    user: Option<User>,
    locale: Arc<dyn LocaleProvider>,
    theme: Theme,
}

impl HomeScreen {
    /// Creates the screen with the wizard focused.
    #[must_use]
    pub fn new(
        api: Arc<dyn AlertApiPort>,
        haptics: Arc<dyn HapticPort>,
        locale: Arc<dyn LocaleProvider>,
    ) -> Self {
        Self {
            section: Section::Wizard,
            wizard: WizardScreen::new(locale.clone(), haptics.clone()),
            danger: DangerZone::new(api, haptics, locale.clone()),
            user: None,
            locale,
            theme: Theme::default(),
        }
    }

    /// Shows `user` in the header.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Returns the focused section.
    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    /// Returns the wizard.
    pub fn wizard_mut(&mut self) -> &mut WizardScreen {
        &mut self.wizard
    }

    /// Returns the danger zone.
    pub fn danger_mut(&mut self) -> &mut DangerZone {
        &mut self.danger
    }

    fn is_busy(&self) -> bool {
        self.danger.is_modal() || self.wizard.controller().is_submitting()
    }

    /// Handles key event, returns what the app should do.
    pub fn handle_key(&mut self, key: KeyEvent) -> HomeKeyResult {
        if !self.is_busy() {
            if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return HomeKeyResult::Logout;
            }
            if key.code == KeyCode::Tab {
                self.section = match self.section {
                    Section::Wizard => Section::Danger,
                    Section::Danger => Section::Wizard,
                };
                return HomeKeyResult::Consumed;
            }
        }

        match self.section {
            Section::Wizard => match self.wizard.handle_key(key) {
                WizardKeyResult::Submit(payload) => HomeKeyResult::Submit(payload),
                WizardKeyResult::Consumed | WizardKeyResult::Ignored => HomeKeyResult::Consumed,
            },
            Section::Danger => match self.danger.handle_key(key) {
                DangerKeyResult::Run(action) => HomeKeyResult::Run(action),
                DangerKeyResult::Consumed | DangerKeyResult::Ignored => HomeKeyResult::Consumed,
            },
        }
    }

    fn header_line(&self) -> Line<'_> {
        let mut spans = vec![Span::styled(
            self.locale.text("app.title", "CoinAlert"),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(user) = &self.user {
            let signed_in = self
                .locale
                .text("home.signed_in", "Signed in as {name}")
                .replace("{name}", user.display_name());
            spans.push(Span::raw("  "));
            spans.push(Span::styled(signed_in, self.theme.dimmed_style));
        }
        Line::from(spans)
    }
}

impl Widget for &HomeScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header_area, tabs_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Paragraph::new(self.header_line()).render(header_area, buf);

        let selected = match self.section {
            Section::Wizard => 0,
            Section::Danger => 1,
        };
        Tabs::new(vec![
            self.locale.text("home.tab.create", "New alert"),
            self.locale.text("home.tab.danger", "Danger zone"),
        ])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .block(Block::default().borders(Borders::BOTTOM).border_style(self.theme.dimmed_style))
        .render(tabs_area, buf);

        let body = Rect {
            y: body_area.y + 1,
            height: body_area.height.saturating_sub(1),
            ..body_area
        };
        match self.section {
            Section::Wizard => (&self.wizard).render(body, buf),
            Section::Danger => (&self.danger).render(body, buf),
        }

        Paragraph::new(Span::styled(
            self.locale.text(
                "home.hint",
                "Tab switch section · Ctrl+L log out · Ctrl+C quit",
            ),
            Style::default().fg(Color::DarkGray),
        ))
        .render(footer_area, buf);
    }
}
