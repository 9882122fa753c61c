use anyhow::Result;
use clap::Parser;
use folio::application::{ServerConfig, serve};
use folio::presentation::cli::{Cli, Commands, covers};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => {
            let config = ServerConfig {
                bind_address: cmd.bind_address,
                database_url: cmd.database_url,
                covers_dir: cmd.covers_dir,
                fallback_cover: cmd.fallback_cover,
                github_username: cmd.github_user,
                github_token: cmd.github_token,
                allowed_origins: cmd.allowed_origins,
            };
            serve(config).await
        }
        Commands::FetchCovers(cmd) => covers::run(cmd).await,
    }
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
