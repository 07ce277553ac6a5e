//! Transient on-screen messages.

use std::time::{Duration, Instant};

/// Severity of a toast, picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Neutral information.
    Info,
    /// A finished operation.
    Success,
    /// Something needs attention.
    Warn,
    /// A failed operation.
    Error,
}

/// Short-lived message shown over the current screen.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Bold first line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the toast first reached the screen.
    pub displayed_at: Option<Instant>,
    /// How long it stays visible once displayed.
    pub duration: Duration,
}

impl Toast {
    /// Creates a toast with the default duration.
    #[must_use]
    pub fn new(level: ToastLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            displayed_at: None,
            duration: Duration::from_secs(4),
        }
    }

    /// Overrides the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns whether the toast has been visible for its full duration.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    /// Starts the expiry clock. Later calls keep the first timestamp.
    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}
