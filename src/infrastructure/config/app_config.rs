//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::infrastructure::api::DEFAULT_API_BASE;

pub(crate) const APP_NAME: &str = "coinalert";
pub(crate) const APP_QUALIFIER: &str = "app";
pub(crate) const APP_ORGANIZATION: &str = "coinalert";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Russian.
    Ru,
}

impl Language {
    /// Returns the language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Alerts API base URL.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Interface language.
    #[serde(default)]
    pub language: Language,

    /// Ring the terminal bell for heavy feedback.
    #[serde(default = "default_true")]
    pub haptics: bool,

    /// Remember the session token between runs.
    #[serde(default = "default_true")]
    pub persist_session: bool,

    /// Toast display duration in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_toast_duration() -> u64 {
    4
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    ///
    /// The session token is not part of the configuration; take it out of
    /// `args` before merging.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api_base_url = api_url;
        }
        if let Some(language) = args.language {
            self.language = language;
        }
        if let Some(haptics) = args.haptics {
            self.haptics = haptics;
        }
        if let Some(persist_session) = args.persist_session {
            self.persist_session = persist_session;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("coinalert.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the toast duration.
    #[must_use]
    pub const fn toast_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.toast_duration)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api_base_url: default_api_base_url(),
            language: Language::En,
            haptics: true,
            persist_session: true,
            toast_duration: default_toast_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            language = "ru"
            haptics = false
            api_base_url = "http://localhost:8080"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.language, Language::Ru);
        assert!(!config.haptics);
        assert!(config.persist_session);
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
        assert_eq!(config.language, Language::En);
        assert!(config.haptics);
        assert_eq!(config.toast_duration(), std::time::Duration::from_secs(4));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = CliArgs::parse_from([
            "coinalert",
            "--language",
            "ru",
            "--haptics",
            "false",
            "--log-level",
            "debug",
        ]);
        let mut config = AppConfig::default();
        config.merge_with_args(args);

        assert_eq!(config.language, Language::Ru);
        assert!(!config.haptics);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.persist_session);
    }
}
