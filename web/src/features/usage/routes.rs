use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{get_participant_usage, get_popularity};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/popularity", get(get_popularity))
        .route("/:participant_id", get(get_participant_usage))
}
