//! Wizard progress header.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

/// Step labels with the current one highlighted, over a progress bar.
pub struct StepIndicator<'a> {
    labels: &'a [String],
    current: usize,
    progress: f64,
    accent: Color,
}

impl<'a> StepIndicator<'a> {
    /// `current` is one-based; `progress` must lie in `[0, 1]`.
    #[must_use]
    pub fn new(labels: &'a [String], current: usize, progress: f64) -> Self {
        Self {
            labels,
            current,
            progress: progress.clamp(0.0, 1.0),
            accent: Color::Cyan,
        }
    }

    /// Sets the highlight color.
    #[must_use]
    pub const fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    fn steps_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(self.labels.len() * 2);
        for (i, label) in self.labels.iter().enumerate() {
            let position = i + 1;
            let (marker, style) = match position.cmp(&self.current) {
                std::cmp::Ordering::Less => ("✓", Style::default().fg(Color::Green)),
                std::cmp::Ordering::Equal => (
                    "●",
                    Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
                ),
                std::cmp::Ordering::Greater => ("○", Style::default().fg(Color::DarkGray)),
            };
            if i > 0 {
                spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(format!("{marker} {label}"), style));
        }
        Line::from(spans)
    }
}

impl Widget for StepIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [steps_area, gauge_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        Paragraph::new(self.steps_line()).render(steps_area, buf);

        Gauge::default()
            .gauge_style(Style::default().fg(self.accent).bg(Color::Black))
            .ratio(self.progress)
            .label(format!("{}/{}", self.current, self.labels.len()))
            .render(gauge_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_follow_position() {
        let labels: Vec<String> = ["Coin", "Type", "Condition", "Confirm"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let indicator = StepIndicator::new(&labels, 2, 0.5);
        let text: String = indicator
            .steps_line()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();

        assert_eq!(text, "✓ Coin ─ ● Type ─ ○ Condition ─ ○ Confirm");
    }
}
