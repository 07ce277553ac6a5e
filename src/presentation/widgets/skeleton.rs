//! Placeholder bars shown while content loads.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

const SHIMMER_WIDTH: u16 = 6;

/// Animated placeholder. Advance `frame` on every tick.
#[derive(Debug, Clone, Copy)]
pub struct Skeleton {
    rows: u16,
    frame: u16,
}

impl Skeleton {
    /// Creates `rows` placeholder bars.
    #[must_use]
    pub const fn new(rows: u16) -> Self {
        Self { rows, frame: 0 }
    }

    /// Sets the animation frame.
    #[must_use]
    pub const fn frame(mut self, frame: u16) -> Self {
        self.frame = frame;
        self
    }

    /// Width of row `row` as a share of the area, so bars look like text.
    const fn row_width(row: u16, width: u16) -> u16 {
        match row % 3 {
            0 => width,
            1 => width.saturating_mul(4) / 5,
            _ => width.saturating_mul(3) / 5,
        }
    }
}

impl Widget for Skeleton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = Style::default().fg(Color::DarkGray);
        let shine = Style::default().fg(Color::Gray);
        let span = area.width.saturating_add(SHIMMER_WIDTH).max(1);
        let head = self.frame % span;

        for row in 0..self.rows.min(area.height / 2 + 1) {
            let y = area.y + row * 2;
            if y >= area.bottom() {
                break;
            }
            for dx in 0..Self::row_width(row, area.width) {
                let in_shine = dx <= head && head - dx < SHIMMER_WIDTH;
                let (symbol, style) = if in_shine { ("▓", shine) } else { ("░", base) };
                buf[(area.x + dx, y)].set_symbol(symbol).set_style(style);
            }
        }
    }
}
