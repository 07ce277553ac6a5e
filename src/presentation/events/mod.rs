//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
}

/// Key classification shared by every screen.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key quits from any screen.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Release and repeat events are reported by some terminals; screens only
    /// react to presses.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, kind)
    }

    #[test]
    fn test_quit_events() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press
        )));
    }

    #[test]
    fn test_plain_keys_do_not_quit() {
        for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Char('c')] {
            assert!(!EventHandler::is_quit_event(&make_key_event(
                code,
                KeyModifiers::NONE,
                KeyEventKind::Press
            )));
        }
    }

    #[test]
    fn test_release_is_not_press() {
        assert!(!EventHandler::is_press(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release
        )));
    }
}
