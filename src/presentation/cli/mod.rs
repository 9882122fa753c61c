pub mod covers;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use covers::FetchCoversCommand;

#[derive(Debug, Parser)]
#[command(author, version, about = "Portfolio backend: comments, books and cover resolution", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// Batch-download covers for a JSON book list
    #[command(name = "fetch-covers")]
    FetchCovers(FetchCoversCommand),
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(long, env = "FOLIO_DATABASE_URL", default_value = "sqlite://folio.db")]
    pub database_url: String,

    #[arg(long, env = "FOLIO_BIND_ADDRESS", default_value = "127.0.0.1:5001")]
    pub bind_address: SocketAddr,

    /// Directory uploaded cover images are written to
    #[arg(long, env = "FOLIO_COVERS_DIR", default_value = "public/books")]
    pub covers_dir: PathBuf,

    /// Placeholder served when no cover source yields a result
    #[arg(
        long,
        env = "FOLIO_FALLBACK_COVER",
        default_value = "/books/default-book-cover.jpg"
    )]
    pub fallback_cover: String,

    /// GitHub account shown in the overview endpoint
    #[arg(long, env = "FOLIO_GITHUB_USER", default_value = "sunnycho100")]
    pub github_user: String,

    /// Optional token to lift GitHub API rate limits
    #[arg(long, env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Frontend origins allowed by CORS, comma separated
    #[arg(
        long,
        env = "FOLIO_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = [
            "http://localhost:5173".to_string(),
            "http://localhost:3000".to_string(),
            "http://localhost:3001".to_string(),
            "http://localhost:3002".to_string(),
        ]
    )]
    pub allowed_origins: Vec<String>,
}
