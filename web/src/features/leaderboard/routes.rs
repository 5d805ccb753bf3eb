use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{get_leaderboard, get_own_rank};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_leaderboard))
        .route("/rank/:participant_id", get(get_own_rank))
}
