//! Bordered content panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

/// Bordered panel with an optional title.
pub struct Card<'a> {
    title: Option<String>,
    body: Vec<Line<'a>>,
    highlighted: bool,
    accent: Color,
}

impl<'a> Card<'a> {
    /// Creates a card around `body`.
    #[must_use]
    pub fn new(body: Vec<Line<'a>>) -> Self {
        Self {
            title: None,
            body,
            highlighted: false,
            accent: Color::Cyan,
        }
    }

    /// Sets the border title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Draws the border in the accent color.
    #[must_use]
    pub const fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Sets the accent color.
    #[must_use]
    pub const fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.highlighted {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        if let Some(title) = self.title {
            block = block.title(Span::styled(format!(" {title} "), border_style));
        }

        Paragraph::new(self.body)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
