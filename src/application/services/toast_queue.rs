//! Queued on-screen messages.

use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Toast, ToastLevel};

/// FIFO of toasts; the front one is on screen until it expires.
#[derive(Debug)]
pub struct ToastQueue {
    queue: VecDeque<Toast>,
    default_duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

impl ToastQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    /// Appends a toast.
    pub fn push(&mut self, level: ToastLevel, title: impl Into<String>, message: impl Into<String>) {
        let toast = Toast::new(level, title, message).with_duration(self.default_duration);
        self.queue.push_back(toast);
    }

    /// Appends an informational toast.
    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastLevel::Info, title, message);
    }

    /// Appends a success toast.
    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastLevel::Success, title, message);
    }

    /// Appends an error toast.
    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.push(ToastLevel::Error, title, message);
    }

    /// Starts the front toast and drops it once expired.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    /// Returns the toast on screen.
    #[must_use]
    pub fn current(&self) -> Option<&Toast> {
        self.queue.front()
    }

    /// Number of pending toasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_toast_flow() {
        let mut queue = ToastQueue::default();

        queue.success("Done", "Watchlist cleared");
        assert_eq!(queue.current().unwrap().level, ToastLevel::Success);

        queue.tick();
        assert!(queue.current().is_some());
    }

    #[test]
    fn test_queueing() {
        let mut queue = ToastQueue::default();
        queue.info("1", "First");
        queue.error("2", "Second");

        assert_eq!(queue.current().unwrap().title, "1");

        queue.tick();
        queue.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());
        queue.tick();

        assert_eq!(queue.current().unwrap().title, "2");
        assert_eq!(queue.len(), 1);
        assert!(queue.current().unwrap().displayed_at.is_some());
    }
}
