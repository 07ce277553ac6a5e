//! Terminal haptic feedback.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use tracing::{trace, warn};

use crate::domain::ports::{HapticPort, ImpactStyle, NotificationKind};

const BELL: &[u8] = b"\x07";

/// Haptics for a terminal: heavy impacts and error notifications ring the
/// bell, everything else is only traced.
pub struct TerminalHaptics<W: Write + Send = Stdout> {
    enabled: bool,
    out: Mutex<W>,
}

impl TerminalHaptics<Stdout> {
    /// Creates haptics writing to stdout.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self::with_writer(enabled, io::stdout())
    }
}

impl<W: Write + Send> TerminalHaptics<W> {
    /// Creates haptics writing the bell to `out`.
    pub fn with_writer(enabled: bool, out: W) -> Self {
        Self {
            enabled,
            out: Mutex::new(out),
        }
    }

    fn ring(&self) {
        if !self.enabled {
            return;
        }
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(e) = out.write_all(BELL).and_then(|()| out.flush()) {
            warn!(error = %e, "Failed to ring terminal bell");
        }
    }

    #[cfg(test)]
    fn written(&self) -> Vec<u8>
    where
        W: AsRef<[u8]>,
    {
        self.out
            .lock()
            .map(|out| out.as_ref().to_vec())
            .unwrap_or_default()
    }
}

impl<W: Write + Send> HapticPort for TerminalHaptics<W> {
    fn impact(&self, style: ImpactStyle) {
        trace!(?style, "Haptic impact");
        if style == ImpactStyle::Heavy {
            self.ring();
        }
    }

    fn notify(&self, kind: NotificationKind) {
        trace!(?kind, "Haptic notification");
        if kind == NotificationKind::Error {
            self.ring();
        }
    }

    fn selection_changed(&self) {
        trace!("Haptic selection change");
    }
}
