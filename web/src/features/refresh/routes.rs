use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::require_api_key;
use crate::state::AppState;

use super::handlers::{refresh_status, trigger_refresh};

pub fn routes() -> Router<AppState> {
    Router::new().route("/status", get(refresh_status))
}

pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/refresh", post(trigger_refresh))
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}
