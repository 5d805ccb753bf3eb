use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use storage::dto::refresh::{RefreshStatusResponse, RefreshTriggerResponse};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

const DEVICE_KEY_HEADER: &str = "x-device-key";

fn device_key(headers: &HeaderMap) -> Result<&str, WebError> {
    headers
        .get(DEVICE_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| WebError::BadRequest(format!("{DEVICE_KEY_HEADER} header is required")))
}

#[utoipa::path(
    get,
    path = "/api/refresh/status",
    responses(
        (status = 200, description = "Refresh affordance for this device", body = RefreshStatusResponse),
        (status = 400, description = "Missing device key header")
    ),
    tag = "refresh"
)]
pub async fn refresh_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let device_key = device_key(&headers)?;

    let status = services::refresh_status(&state, device_key).await?;

    Ok(Json(status).into_response())
}

#[utoipa::path(
    post,
    path = "/api/admin/refresh",
    responses(
        (status = 200, description = "Recompute ran; body reports the outcome", body = RefreshTriggerResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 409, description = "A refresh is already in progress"),
        (status = 429, description = "Blocked by cooldown or daily cap")
    ),
    security(("bearer_auth" = [])),
    tag = "refresh"
)]
pub async fn trigger_refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let device_key = device_key(&headers)?;

    let outcome = services::trigger_refresh(&state, device_key).await?;

    Ok(Json(outcome).into_response())
}
