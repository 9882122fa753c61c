use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::application::routes::app_router;
use crate::application::state::{AppState, AppStateConfig};
use crate::infrastructure::covers::{google_books, open_library};
use crate::infrastructure::database::Database;
use crate::infrastructure::github;

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub covers_dir: PathBuf,
    pub fallback_cover: String,
    pub github_username: String,
    pub github_token: Option<String>,
    pub allowed_origins: Vec<String>,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let database = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    tokio::fs::create_dir_all(&config.covers_dir)
        .await
        .with_context(|| format!("failed to create covers directory {}", config.covers_dir.display()))?;

    let state = AppState::from_database(
        &database,
        AppStateConfig {
            open_library_url: open_library::SEARCH_URL.to_string(),
            open_library_covers_url: open_library::COVERS_URL.to_string(),
            google_books_url: google_books::VOLUMES_URL.to_string(),
            github_api_url: github::API_URL.to_string(),
            github_username: config.github_username,
            github_token: config.github_token,
            covers_dir: config.covers_dir,
            fallback_cover: config.fallback_cover,
            allowed_origins: config.allowed_origins,
        },
    );

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        database = %config.database_url,
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
