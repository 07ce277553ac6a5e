//! Alert creation wizard.

mod controller;
mod steps;

pub use controller::WizardController;
pub use steps::{
    AlertDraft, AlertOptions, ConditionInput, DEFAULT_STEP_LABELS, MAX_NOTE_LENGTH, StepData,
    WizardStep,
};
