//! Alert wizard error types.

use thiserror::Error;

use super::ApiError;

/// Reason a wizard operation was refused or failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The current step's input does not pass its validator.
    #[error("step {step} is not complete")]
    StepInvalid {
        /// One-based step index.
        step: usize,
    },

    /// Retreat requested on the first step.
    #[error("already at the first step")]
    AtFirstStep,

    /// Advance requested on the last step.
    #[error("already at the last step")]
    AtLastStep,

    /// Submit requested before the final step is valid.
    #[error("the alert is not ready to be submitted")]
    NotReady,

    /// Submit requested while a submission is in flight.
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// The backend refused the alert.
    #[error("failed to create alert: {0}")]
    Submission(#[from] ApiError),
}

/// Wizard built with an inconsistent step table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Label count differs from the number of steps.
    #[error("wizard expects {expected} step labels, got {actual}")]
    StepCountMismatch {
        /// Number of steps the wizard drives.
        expected: usize,
        /// Number of labels supplied.
        actual: usize,
    },
}
