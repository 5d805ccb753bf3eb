use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::dto::common::CursorPage;
use storage::dto::leaderboard::{LeaderboardEntry, LeaderboardQuery, OwnRankResponse};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "One ranked leaderboard page", body = CursorPage<LeaderboardEntry>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let page = services::get_leaderboard(
        state.db.pool(),
        &query,
        state.sentinel_participant_id,
    )
    .await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/rank/{participant_id}",
    params(
        ("participant_id" = Uuid, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "The participant's rank, null when unknown", body = OwnRankResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "leaderboard"
)]
pub async fn get_own_rank(
    State(state): State<AppState>,
    Path(participant_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let response = services::get_own_rank(
        state.db.pool(),
        participant_id,
        state.sentinel_participant_id,
    )
    .await?;

    Ok(Json(response).into_response())
}
