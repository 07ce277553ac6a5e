mod alert_api_port;
mod auth_port;
mod haptic_port;
mod locale_port;
mod token_storage_port;

pub use alert_api_port::AlertApiPort;
pub use auth_port::AuthPort;
pub use haptic_port::{HapticPort, ImpactStyle, NoHaptics, NotificationKind};
pub use locale_port::{DefaultStrings, LocaleProvider};
pub use token_storage_port::TokenStoragePort;

#[cfg(test)]
pub mod mocks {
    pub use super::alert_api_port::MockAlertApiPort;
    pub use super::auth_port::mock::MockAuthPort;
    pub use super::haptic_port::mock::{Feedback, RecordingHaptics};
    pub use super::token_storage_port::mock::MockTokenStorage;
}
