use super::app_config::{Language, LogLevel};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "coinalert",
    version,
    about = "Terminal client for cryptocurrency price alerts",
    long_about = None
)]
/// Command line arguments, each overriding the config file.
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Alerts API base URL.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Interface language.
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,

    /// Session token (skips the login screen when valid).
    #[arg(short, long, env = "COINALERT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable haptic feedback (terminal bell).
    #[arg(long)]
    pub haptics: Option<bool>,

    /// Remember the session token between runs.
    #[arg(long)]
    pub persist_session: Option<bool>,
}
