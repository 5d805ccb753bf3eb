use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::usage::{PopularityResponse, UsageResponse};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/usage/{participant_id}",
    params(
        ("participant_id" = Uuid, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "Pick counts for the participant", body = UsageResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "usage"
)]
pub async fn get_participant_usage(
    State(state): State<AppState>,
    Path(participant_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let usage = services::get_participant_usage(state.db.pool(), participant_id).await?;

    Ok(Json(usage).into_response())
}

#[utoipa::path(
    get,
    path = "/api/usage/popularity",
    responses(
        (status = 200, description = "League-wide pick popularity", body = PopularityResponse)
    ),
    tag = "usage"
)]
pub async fn get_popularity(State(state): State<AppState>) -> Result<Response, WebError> {
    let popularity = services::get_popularity(state.db.pool()).await?;

    Ok(Json(popularity).into_response())
}
