//! Modal confirmation dialog.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::application::services::ConfirmationRequest;
use crate::presentation::theme::Theme;

/// Button captions, already localized.
#[derive(Debug, Clone)]
pub struct DialogLabels {
    /// Confirm button.
    pub confirm: String,
    /// Cancel button.
    pub cancel: String,
    /// Shown on the confirm button while loading.
    pub working: String,
}

/// Renders an open [`ConfirmationRequest`]. While `loading`, the cancel
/// button and the close hint are not drawn.
pub struct ConfirmDialog<'a> {
    request: &'a ConfirmationRequest,
    loading: bool,
    labels: &'a DialogLabels,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Creates a dialog for `request`.
    #[must_use]
    pub const fn new(
        request: &'a ConfirmationRequest,
        labels: &'a DialogLabels,
        theme: &'a Theme,
    ) -> Self {
        Self {
            request,
            loading: false,
            labels,
            theme,
        }
    }

    /// Switches to the in-progress rendering.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn popup_area(area: Rect) -> Rect {
        let width = 56.min(area.width.saturating_sub(4)).max(20.min(area.width));
        let height = 9.min(area.height);
        Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        )
    }

    fn buttons(&self, color: Color) -> Line<'a> {
        if self.loading {
            return Line::from(Span::styled(
                self.labels.working.as_str(),
                Style::default().fg(color).add_modifier(Modifier::ITALIC),
            ));
        }

        Line::from(vec![
            Span::styled(
                format!(" {} ", self.labels.cancel),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
            Span::raw("   "),
            Span::styled(
                format!(" {} ", self.labels.confirm),
                Style::default()
                    .fg(Color::Black)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::popup_area(area);
        let color = self.theme.variant_color(self.request.variant);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} ", self.request.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        if !self.loading {
            block = block.title_bottom(Line::from(" esc ").right_aligned());
        }

        let inner = block.inner(popup);
        Clear.render(popup, buf);
        block.render(popup, buf);

        let [message_area, _, buttons_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(self.request.message.as_str())
            .wrap(Wrap { trim: true })
            .render(message_area, buf);
        Paragraph::new(self.buttons(color))
            .centered()
            .render(buttons_area, buf);
    }
}
