use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{get_active_profile, list_profiles, preview};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles))
        .route("/profiles/active", get(get_active_profile))
        .route("/preview", post(preview))
}
