//! Infrastructure layer with external service adapters.

/// Alerts backend client.
pub mod api;
/// Application configuration.
pub mod config;
/// Terminal haptic feedback.
pub mod haptics;
/// Bundled string tables.
pub mod locale;
/// Token storage adapters.
pub mod storage;

pub use api::{DEFAULT_API_BASE, HttpApiClient};
pub use config::{AppConfig, CliArgs, Language, LogLevel, StorageManager};
pub use haptics::TerminalHaptics;
pub use locale::Locale;
pub use storage::FileTokenStorage;
