//! Application configuration.

pub mod app_config;
/// Command line arguments.
pub mod args;
/// Config file loading and saving.
pub mod storage;

pub use app_config::{AppConfig, Language, LogLevel};
pub use args::CliArgs;
pub use storage::{ConfigError, StorageManager};
