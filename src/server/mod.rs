//! Local service bootstrap: prepare storage and the database pool, bind the
//! loopback listener, tell the parent process we are up, then serve until
//! Ctrl-C.

pub mod ready;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::state::AppState;
use crate::storage::StorageRoot;

pub use ready::{ParentMessage, ReadyNotifier};

pub async fn run(cli: &Cli, config: AppConfig) -> Result<()> {
    info!("Starting Dentit web service in {:?} mode", config.environment);

    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let storage = StorageRoot::new(config.storage.root_override.as_deref(), &cwd);
    storage
        .ensure_layout()
        .context("failed to prepare storage directories")?;
    info!("Storage root: {}", storage.path().display());

    let pool = DatabaseManager::connect_lazy(&config.database)
        .context("failed to configure database pool")?;
    if cli.migrate {
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to apply database migrations")?;
    }

    let app = crate::app(AppState::postgres(pool.clone(), storage), config.environment);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    let port = listener
        .local_addr()
        .context("failed to read bound address")?
        .port();

    announce_ready(ReadyNotifier::detect(cli.notify_stdout), &config.server.host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Dentit web service stopped");
    Ok(())
}

fn announce_ready(notifier: ReadyNotifier, host: &str, port: u16) {
    info!("Dentit web server ready on http://{}:{}", host, port);

    match notifier.notify(&ParentMessage::Ready { port }) {
        Ok(true) => info!("Sent ready notification to parent ({:?})", notifier),
        Ok(false) => {}
        Err(e) => warn!("Failed to notify parent process: {}", e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
