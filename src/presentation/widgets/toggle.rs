//! On/off switch.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Labelled boolean switch.
#[derive(Debug, Clone)]
pub struct Toggle {
    label: String,
    on: bool,
    focused: bool,
}

impl Toggle {
    /// Creates a switch in the given position.
    #[must_use]
    pub fn new(label: impl Into<String>, on: bool) -> Self {
        Self {
            label: label.into(),
            on,
            focused: false,
        }
    }

    /// Returns the current position.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Moves the switch to `on`.
    pub fn set(&mut self, on: bool) {
        self.on = on;
    }

    /// Flips the switch and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Highlights the switch.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl Widget for &Toggle {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (knob, knob_style) = if self.on {
            ("[ ●]", Style::default().fg(Color::Green))
        } else {
            ("[○ ]", Style::default().fg(Color::DarkGray))
        };
        let label_style = if self.focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        Paragraph::new(Line::from(vec![
            Span::styled(knob, knob_style),
            Span::raw(" "),
            Span::styled(self.label.as_str(), label_style),
        ]))
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips() {
        let mut toggle = Toggle::new("Repeat", false);
        assert!(toggle.toggle());
        assert!(toggle.is_on());
        assert!(!toggle.toggle());
    }

    #[test]
    fn test_render_shows_state() {
        let toggle = Toggle::new("Repeat", true);
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        (&toggle).render(area, &mut buf);

        let rendered: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(rendered.starts_with("[ ●] Repeat"));
    }
}
