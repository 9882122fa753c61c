use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::repositories::{ArchiveRepository, BookRepository, CommentRepository};
use crate::infrastructure::cover_store::CoverStore;
use crate::infrastructure::covers::{CoverProvider, CoverResolver, GoogleBooks, OpenLibrary};
use crate::infrastructure::database::Database;
use crate::infrastructure::github::GithubClient;
use crate::infrastructure::repositories::archive::SqlArchiveRepository;
use crate::infrastructure::repositories::books::SqlBookRepository;
use crate::infrastructure::repositories::comments::SqlCommentRepository;

/// Everything that varies between production and test environments:
/// external API endpoints, filesystem locations and CORS origins. Repos and
/// clients are created automatically from the database pool.
pub struct AppStateConfig {
    pub open_library_url: String,
    pub open_library_covers_url: String,
    pub google_books_url: String,
    pub github_api_url: String,
    pub github_username: String,
    pub github_token: Option<String>,
    pub covers_dir: PathBuf,
    pub fallback_cover: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub comment_repo: Arc<dyn CommentRepository>,
    pub book_repo: Arc<dyn BookRepository>,
    pub archive_repo: Arc<dyn ArchiveRepository>,
    pub http_client: reqwest::Client,
    pub cover_resolver: Arc<CoverResolver>,
    pub cover_store: Arc<CoverStore>,
    pub github: Arc<GithubClient>,
    pub allowed_origins: Vec<String>,
}

impl AppState {
    /// Build the full application state from a database connection and
    /// config. Creates all repositories and clients internally.
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let pool = database.clone_pool();

        let comment_repo: Arc<dyn CommentRepository> =
            Arc::new(SqlCommentRepository::new(pool.clone()));
        let book_repo: Arc<dyn BookRepository> = Arc::new(SqlBookRepository::new(pool.clone()));
        let archive_repo: Arc<dyn ArchiveRepository> = Arc::new(SqlArchiveRepository::new(pool));

        let providers: Vec<Arc<dyn CoverProvider>> = vec![
            Arc::new(OpenLibrary::new(
                config.open_library_url,
                config.open_library_covers_url,
            )),
            Arc::new(GoogleBooks::new(config.google_books_url)),
        ];
        let cover_resolver = Arc::new(
            CoverResolver::new(providers).with_default_fallback(config.fallback_cover),
        );

        let github = Arc::new(GithubClient::new(
            config.github_api_url,
            config.github_username,
            config.github_token,
        ));

        Self {
            comment_repo,
            book_repo,
            archive_repo,
            #[allow(clippy::expect_used)]
            http_client: reqwest::ClientBuilder::new()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
            cover_resolver,
            cover_store: Arc::new(CoverStore::new(config.covers_dir)),
            github,
            allowed_origins: config.allowed_origins,
        }
    }
}
