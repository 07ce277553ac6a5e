//! Placeholder shown while the stored session is validated.

use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::domain::ports::LocaleProvider;
use crate::presentation::widgets::Skeleton;

/// Skeleton view rendered while the gate is undecided.
pub struct LoadingScreen {
    frame: u16,
    locale: Arc<dyn LocaleProvider>,
}

impl LoadingScreen {
    /// Creates the screen at its first animation frame.
    #[must_use]
    pub fn new(locale: Arc<dyn LocaleProvider>) -> Self {
        Self { frame: 0, locale }
    }

    /// Advances the shimmer animation.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }
}

impl Widget for &LoadingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(60),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, title_area, body_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(9),
            Constraint::Fill(1),
        ])
        .areas(center);

        Paragraph::new(self.locale.text("loading.title", "Checking your session"))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC),
            )
            .centered()
            .render(title_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(body_area);
        block.render(body_area, buf);
        Skeleton::new(4).frame(self.frame).render(inner, buf);
    }
}
