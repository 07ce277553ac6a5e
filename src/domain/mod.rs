//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Transient on-screen messages.
pub mod toast;

pub use entities::{Alert, AlertType, Coin, NewAlert, Session, SessionToken, User};
pub use errors::{ApiError, AuthError, ConfigurationError, WizardError};
pub use ports::{AlertApiPort, AuthPort, HapticPort, LocaleProvider, TokenStoragePort};
pub use toast::{Toast, ToastLevel};
