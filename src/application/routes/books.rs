use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::archive::{ArchiveEntry, ArchiveRecord};
use crate::domain::books::{Book, Language, NewBook, UpdateBook};
use crate::domain::covers::CoverQuery;
use crate::domain::ids::BookId;
use crate::infrastructure::cover_store::cover_file_name;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BookListQuery {
    language: Option<String>,
}

#[tracing::instrument(skip(state))]
pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookListQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let language = match query.language.as_deref().filter(|l| !l.is_empty()) {
        Some(raw) => Some(
            raw.parse::<Language>()
                .map_err(|()| AppError::validation(format!("unknown language: {raw}")))?,
        ),
        None => None,
    };

    let books = state
        .book_repo
        .list(language)
        .await
        .map_err(AppError::from)?;

    Ok(Json(books))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewBookSubmission {
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    review: Option<String>,
    #[serde(default)]
    language: Option<Language>,
    #[serde(default)]
    isbn: Option<String>,
    /// Cover the user already chose; skips resolution when present.
    #[serde(default)]
    image_path: Option<String>,
}

#[tracing::instrument(skip(state, submission))]
pub(crate) async fn create_book(
    State(state): State<AppState>,
    Json(submission): Json<NewBookSubmission>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let language = submission.language.unwrap_or_default();
    let chosen_path = submission
        .image_path
        .filter(|path| !path.trim().is_empty());

    let mut new_book = NewBook {
        title: submission.title,
        author: submission.author,
        image_path: String::new(),
        review: submission.review,
        language,
        isbn: submission.isbn,
    }
    .normalize();
    new_book.validate().map_err(AppError::validation)?;

    // Only consult the external catalogs when no cover was chosen and the
    // book is in English; Korean covers come from manual upload.
    new_book.image_path = match chosen_path {
        Some(path) => path,
        None if language == Language::En => {
            let query = CoverQuery::new(&new_book.title, new_book.author.clone());
            state
                .cover_resolver
                .resolve(&state.http_client, &query, None)
                .await
                .url
        }
        None => state.cover_resolver.fallback_path().to_string(),
    };

    let book = state
        .book_repo
        .insert(new_book)
        .await
        .map_err(AppError::from)?;

    info!(book_id = %book.id, title = %book.title, "book created");
    record_in_archive(&state, &book).await;

    Ok((StatusCode::CREATED, Json(book)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadBookSubmission {
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    review: Option<String>,
    #[serde(default)]
    language: Option<Language>,
    #[serde(default)]
    isbn: Option<String>,
    /// Cover image as a base64 data URL.
    #[serde(default)]
    image: String,
}

#[tracing::instrument(skip(state, submission))]
pub(crate) async fn upload_book(
    State(state): State<AppState>,
    Json(submission): Json<UploadBookSubmission>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    if submission.image.trim().is_empty() {
        return Err(AppError::validation("cover image file is required").into());
    }

    let language = submission.language.unwrap_or_default();
    let mut new_book = NewBook {
        title: submission.title,
        author: submission.author,
        image_path: String::new(),
        review: submission.review,
        language,
        isbn: submission.isbn,
    }
    .normalize();
    new_book.validate().map_err(AppError::validation)?;

    let file_name = cover_file_name(&new_book.title, new_book.author.as_deref(), language);
    new_book.image_path = state
        .cover_store
        .save_data_url(&submission.image, &file_name)
        .await?;

    let book = state
        .book_repo
        .insert(new_book)
        .await
        .map_err(AppError::from)?;

    info!(book_id = %book.id, title = %book.title, cover = %book.image_path, "book created from upload");
    record_in_archive(&state, &book).await;

    Ok((StatusCode::CREATED, Json(book)))
}

#[tracing::instrument(skip(state, payload))]
pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
    Json(payload): Json<UpdateBook>,
) -> Result<Json<Book>, ApiError> {
    let changes = payload.normalize();
    changes.validate().map_err(AppError::validation)?;

    let book = state
        .book_repo
        .update(id, changes)
        .await
        .map_err(AppError::from)?;

    info!(book_id = %book.id, "book updated");

    Ok(Json(book))
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteResult {
    success: bool,
}

#[tracing::instrument(skip(state))]
pub(crate) async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<Json<DeleteResult>, ApiError> {
    let book = state.book_repo.get(id).await.map_err(AppError::from)?;

    // Soft-delete in the archive first; failure is non-fatal.
    if let Err(err) = state
        .archive_repo
        .mark_deleted(&book.title, book.author.as_deref())
        .await
    {
        warn!(error = %err, book_id = %id, "archive soft-delete failed");
    }

    state.book_repo.delete(id).await.map_err(AppError::from)?;

    info!(book_id = %id, title = %book.title, "book deleted");

    Ok(Json(DeleteResult { success: true }))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn list_archive(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArchiveEntry>>, ApiError> {
    let entries = state
        .archive_repo
        .list_all()
        .await
        .map_err(AppError::from)?;

    Ok(Json(entries))
}

/// Record a created book in the archive, logging on failure instead of
/// failing the request.
async fn record_in_archive(state: &AppState, book: &Book) {
    let record = ArchiveRecord {
        title: book.title.clone(),
        author: book.author.clone(),
        image_path: book.image_path.clone(),
        language: book.language,
        isbn: book.isbn.clone(),
    };

    if let Err(err) = state.archive_repo.record_added(record).await {
        warn!(error = %err, book_id = %book.id, "archive update failed");
    }
}
