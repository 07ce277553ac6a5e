//! Haptic feedback port definition.

/// Strength of an impact pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    /// Toggle flips, step changes.
    Light,
    /// Opening a dialog.
    Medium,
    /// Confirming an irreversible action.
    Heavy,
}

/// Outcome feedback kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Operation completed.
    Success,
    /// Operation needs attention.
    Warning,
    /// Operation failed.
    Error,
}

/// Port for haptic feedback. Calls are fire-and-forget.
pub trait HapticPort: Send + Sync {
    /// Signals a discrete interaction.
    fn impact(&self, style: ImpactStyle);

    /// Signals the outcome of an operation.
    fn notify(&self, kind: NotificationKind);

    /// Signals a selection change inside a list.
    fn selection_changed(&self);
}

/// Haptics that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticPort for NoHaptics {
    fn impact(&self, _style: ImpactStyle) {}

    fn notify(&self, _kind: NotificationKind) {}

    fn selection_changed(&self) {}
}
