//! Stateful services behind the interactive flows.

pub mod auth_gate;
pub mod coin_search;
pub mod confirmation;
pub mod destructive_catalog;
pub mod session_store;
pub mod toast_queue;
pub mod wizard;

pub use auth_gate::{AuthGate, GateOutcome, GateState, Route};
pub use coin_search::CoinSearch;
pub use confirmation::{
    ConfirmAction, ConfirmationController, ConfirmationRequest, ConfirmationState, DialogVariant,
};
pub use destructive_catalog::{
    ActionCopy, DestructiveActionCatalog, DestructiveActionCategory, LocalizedCopy,
};
pub use session_store::SessionStore;
pub use toast_queue::ToastQueue;
pub use wizard::{
    AlertDraft, AlertOptions, ConditionInput, DEFAULT_STEP_LABELS, MAX_NOTE_LENGTH, StepData,
    WizardController, WizardStep,
};
