use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::covers::{CoverCandidate, CoverQuery};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CoverSearchQuery {
    title: Option<String>,
    author: Option<String>,
}

/// Multi-source cover search for interactive selection: every provider is
/// queried concurrently and all candidates are returned in chain order.
#[tracing::instrument(skip(state))]
pub(crate) async fn search_covers(
    State(state): State<AppState>,
    Query(query): Query<CoverSearchQuery>,
) -> Result<Json<Vec<CoverCandidate>>, ApiError> {
    let title = query
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("title is required"))?;

    let cover_query = CoverQuery::new(title, query.author);
    let candidates = state
        .cover_resolver
        .search_candidates(&state.http_client, &cover_query)
        .await;

    Ok(Json(candidates))
}
