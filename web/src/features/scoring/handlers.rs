use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::scoring::{ScorePreviewRequest, ScorePreviewResponse, ScoringProfileResponse};
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/scoring/profiles",
    responses(
        (status = 200, description = "All scoring profiles", body = Vec<ScoringProfileResponse>)
    ),
    tag = "scoring"
)]
pub async fn list_profiles(State(state): State<AppState>) -> Result<Response, WebError> {
    let profiles = services::list_profiles(state.db.pool()).await?;

    Ok(Json(profiles).into_response())
}

#[utoipa::path(
    get,
    path = "/api/scoring/profiles/active",
    responses(
        (status = 200, description = "The active scoring profile", body = ScoringProfileResponse),
        (status = 404, description = "No active profile configured")
    ),
    tag = "scoring"
)]
pub async fn get_active_profile(State(state): State<AppState>) -> Result<Response, WebError> {
    let profile = services::get_active_profile(state.db.pool()).await?;

    Ok(Json(profile).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scoring/preview",
    request_body = ScorePreviewRequest,
    responses(
        (status = 200, description = "What the picks would score", body = ScorePreviewResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "No result saved for this event")
    ),
    tag = "scoring"
)]
pub async fn preview(
    State(state): State<AppState>,
    Json(payload): Json<ScorePreviewRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let response = services::preview(state.db.pool(), payload).await?;

    Ok(Json(response).into_response())
}
