use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use gestao::application::services::{GestaoClient, SessionAccessor};
use gestao::application::use_cases::{LoginUseCase, LogoutUseCase, ResolveSessionUseCase};
use gestao::domain::Route;
use gestao::infrastructure::{
    AppConfig, CliArgs, GestaoHttpClient, IdentityClient, StorageManager,
    default_session_storage,
};
use gestao::presentation::{App, Backend};

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

fn load_config(args: &CliArgs) -> AppConfig {
    let loaded = StorageManager::new().and_then(|storage| storage.load_config(args.config.as_deref()));
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("Failed to load configuration, using defaults: {e}");
        AppConfig::default()
    });
    config.merge_with_args(args);
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = load_config(&args);

    init_logging(&config)?;
    color_eyre::install()?;

    info!(version = gestao::VERSION, api = %config.api.base_url, "Starting {}", gestao::NAME);

    let timeout = Duration::from_secs(config.api.timeout_secs);
    let api = Arc::new(GestaoHttpClient::new(config.api.base_url.clone(), timeout)?);
    let identity = Arc::new(IdentityClient::new(
        config.api.auth_url.clone(),
        config.api.auth_public_key.clone(),
        timeout,
    )?);
    let storage = default_session_storage();
    let session = Arc::new(SessionAccessor::new(storage.clone()));

    let resolved = ResolveSessionUseCase::new(storage.clone(), identity.clone())
        .execute(args.token.clone())
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Could not resolve a session at startup");
            None
        });
    if let Some(resolved) = &resolved {
        session.remember(resolved.session.clone()).await;
    }

    let initial_route = match args.open.as_deref() {
        Some(path) => Route::parse(path).unwrap_or_else(|| {
            warn!(path, "Unknown route, opening the dashboard");
            Route::Dashboard
        }),
        None => Route::Dashboard,
    };

    let client = GestaoClient::new(session.clone(), api);
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let backend = Backend::new(
        client,
        LoginUseCase::new(identity, storage.clone()),
        LogoutUseCase::new(storage),
        session,
        command_rx,
        action_tx,
    );
    tokio::spawn(backend.run());

    let app = App::new(
        command_tx,
        action_rx,
        Duration::from_secs(config.ui.notification_duration),
        config.persist_session,
    );

    let mut terminal = ratatui::init();
    if config.ui.mouse {
        execute!(std::io::stdout(), EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal, resolved, initial_route).await;

    if config.ui.mouse {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();

    result
}
