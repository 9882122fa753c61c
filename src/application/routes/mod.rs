pub(crate) mod books;
pub(crate) mod comments;
pub(crate) mod covers;
pub(crate) mod github;
pub(crate) mod health;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, Request};
use axum::routing::{get, post, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span, warn};

use crate::application::state::AppState;

/// 100 KB request body limit for the JSON endpoints.
const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Ceiling for the cover-upload route: a 5 MB image grows by ~4/3 as a
/// base64 data URL.
const UPLOAD_LIMIT_BYTES: usize = 8 * 1024 * 1024;

pub fn app_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.allowed_origins);

    axum::Router::new()
        .route("/api/health", get(health::health))
        .route(
            "/api/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/api/books",
            get(books::list_books).post(books::create_book),
        )
        .route("/api/books/search", get(covers::search_covers))
        .route(
            "/api/books/upload",
            post(books::upload_book).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
        .route(
            "/api/books/{id}",
            put(books::update_book).delete(books::delete_book),
        )
        .route("/api/books/archive/all", get(books::list_archive))
        .route("/api/github/overview", get(github::github_overview))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(FolioMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(RequestBodyLimitLayer::new(UPLOAD_LIMIT_BYTES))
                .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::REFERRER_POLICY,
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(CompressionLayer::new().gzip(true))
                .layer(cors),
        )
        .with_state(state)
}

/// CORS restricted to the configured frontend origins.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[derive(Clone)]
struct FolioMakeSpan;

impl<B> MakeSpan<B> for FolioMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}
