//! Colors shared by screens and widgets.

use ratatui::style::{Color, Modifier, Style};

use crate::application::services::DialogVariant;
use crate::domain::ToastLevel;

/// Palette and styles derived from one accent color.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Focus, selection and informational color.
    pub accent: Color,
    /// Success color.
    pub success: Color,
    /// Warning color.
    pub warning: Color,
    /// Destructive and error color.
    pub danger: Color,
    /// Style of the selected row.
    pub selection_style: Style,
    /// Style of hints and inactive text.
    pub dimmed_style: Style,
    /// Default text style.
    pub base_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_color(Color::Cyan)
    }
}

impl Theme {
    /// Builds a theme around `accent`.
    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        Self {
            accent,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            selection_style: Style::default()
                .bg(accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(Color::DarkGray),
            base_style: Style::default().fg(Color::Reset),
        }
    }

    /// Border color for a dialog of the given severity.
    #[must_use]
    pub const fn variant_color(&self, variant: DialogVariant) -> Color {
        match variant {
            DialogVariant::Default => self.accent,
            DialogVariant::Warning => self.warning,
            DialogVariant::Danger => self.danger,
        }
    }

    /// Border color for a toast of the given level.
    #[must_use]
    pub const fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Info => self.accent,
            ToastLevel::Success => self.success,
            ToastLevel::Warn => self.warning,
            ToastLevel::Error => self.danger,
        }
    }
}
