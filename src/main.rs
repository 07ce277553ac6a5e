use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use coinalert::application::services::SessionStore;
use coinalert::infrastructure::{
    AppConfig, CliArgs, FileTokenStorage, HttpApiClient, Locale, StorageManager, TerminalHaptics,
};
use coinalert::presentation::{App, AppServices};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, Option<String>)> {
    let mut args = CliArgs::parse();
    let cli_token = args.token.take();

    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    Ok((config, cli_token))
}

fn create_app() -> Result<(App, Option<String>)> {
    let (config, cli_token) = load_config()?;

    init_logging(&config)?;

    info!(
        version = coinalert::VERSION,
        language = config.language.code(),
        api = %config.api_base_url,
        "Starting Coinalert"
    );

    let session_store = Arc::new(SessionStore::new());
    let api_client = Arc::new(HttpApiClient::new(
        config.api_base_url.clone(),
        session_store.clone(),
    )?);

    let services = AppServices {
        session_store,
        auth: api_client.clone(),
        token_storage: Arc::new(FileTokenStorage::new()?),
        alert_api: api_client,
        haptics: Arc::new(TerminalHaptics::new(config.haptics)),
        locale: Arc::new(Locale::load(config.language)),
    };

    Ok((App::new(services, &config), cli_token))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let (app, cli_token) = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal, cli_token).await;

    ratatui::restore();

    result
}
