use axum::Json;
use axum::extract::State;

use crate::application::errors::ApiError;
use crate::application::state::AppState;
use crate::domain::github::GithubOverview;

#[tracing::instrument(skip(state))]
pub(crate) async fn github_overview(
    State(state): State<AppState>,
) -> Result<Json<GithubOverview>, ApiError> {
    let overview = state.github.overview(&state.http_client).await?;
    Ok(Json(overview))
}
