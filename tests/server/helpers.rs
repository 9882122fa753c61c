use std::sync::Arc;

use folio::application::routes::app_router;
use folio::application::state::{AppState, AppStateConfig};
use folio::domain::repositories::{ArchiveRepository, BookRepository, CommentRepository};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tokio::net::TcpListener;
use tokio::task::AbortHandle;

pub const GITHUB_USER: &str = "test-user";

/// An in-process server over an in-memory database, with every external
/// API pointed at a single wiremock server.
pub struct TestApp {
    pub address: String,
    pub book_repo: Arc<dyn BookRepository>,
    pub comment_repo: Arc<dyn CommentRepository>,
    #[allow(dead_code)]
    pub archive_repo: Arc<dyn ArchiveRepository>,
    pub mock_server: wiremock::MockServer,
    pub covers_dir: tempfile::TempDir,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_app() -> TestApp {
    let mock_server = wiremock::MockServer::start().await;

    let database = folio::infrastructure::database::Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    let covers_dir = tempfile::tempdir().expect("Failed to create temp covers dir");

    let config = AppStateConfig {
        open_library_url: mock_server.uri(),
        // Only used for URL construction, never fetched in tests
        open_library_covers_url: "https://covers.openlibrary.org".to_string(),
        google_books_url: format!("{}/books/v1", mock_server.uri()),
        github_api_url: mock_server.uri(),
        github_username: GITHUB_USER.to_string(),
        github_token: None,
        covers_dir: covers_dir.path().to_path_buf(),
        fallback_cover: "/books/default-book-cover.jpg".to_string(),
        allowed_origins: vec!["http://localhost:5173".to_string()],
    };

    let state = AppState::from_database(&database, config);

    // Clone repos we need for TestApp before consuming state in the router
    let book_repo = state.book_repo.clone();
    let comment_repo = state.comment_repo.clone();
    let archive_repo = state.archive_repo.clone();

    let app = app_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        book_repo,
        comment_repo,
        archive_repo,
        mock_server,
        covers_dir,
        server_handle,
    }
}

/// Generic helper: POST a JSON payload and deserialize the response.
pub async fn create_entity<P: Serialize, R: DeserializeOwned>(
    app: &TestApp,
    path: &str,
    payload: &P,
) -> R {
    let client = Client::new();
    let response = client
        .post(app.api_url(path))
        .json(payload)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create entity at {path}: {e}"));

    response
        .json()
        .await
        .unwrap_or_else(|e| panic!("failed to deserialize entity from {path}: {e}"))
}

pub async fn create_book_with_cover(
    app: &TestApp,
    title: &str,
    author: Option<&str>,
) -> folio::domain::books::Book {
    create_entity(
        app,
        "/books",
        &serde_json::json!({
            "title": title,
            "author": author,
            "imagePath": "/books/preset.jpg",
        }),
    )
    .await
}

pub async fn create_default_comment(app: &TestApp, message: &str) -> folio::domain::comments::Comment {
    create_entity(
        app,
        "/comments",
        &serde_json::json!({
            "name": "Test Visitor",
            "message": message,
        }),
    )
    .await
}

/// A small valid PNG as a base64 data URL, for upload tests.
pub fn png_data_url() -> String {
    use base64::Engine;

    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([180, 40, 40]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("failed to encode test PNG");

    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(out.into_inner())
    )
}
