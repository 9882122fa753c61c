use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::comments::{Comment, DEFAULT_COMMENT_TAKE, MAX_COMMENT_TAKE, NewComment};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommentListQuery {
    take: Option<u32>,
}

#[tracing::instrument(skip(state))]
pub(crate) async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentListQuery>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let take = query
        .take
        .filter(|&t| t > 0)
        .unwrap_or(DEFAULT_COMMENT_TAKE)
        .min(MAX_COMMENT_TAKE);

    let comments = state
        .comment_repo
        .list_recent(take)
        .await
        .map_err(AppError::from)?;

    Ok(Json(comments))
}

#[tracing::instrument(skip(state, payload))]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = payload.normalize();
    comment.validate().map_err(AppError::validation)?;

    let created = state
        .comment_repo
        .insert(comment)
        .await
        .map_err(AppError::from)?;

    info!(comment_id = %created.id, "comment created");

    Ok((StatusCode::CREATED, Json(created)))
}
