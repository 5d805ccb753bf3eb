use std::sync::Arc;

use storage::Database;
use uuid::Uuid;

use crate::features::refresh::gate::RefreshGate;
use crate::middleware::auth::ApiKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub refresh: Arc<RefreshGate>,
    pub api_keys: Arc<ApiKeys>,
    pub sentinel_participant_id: Option<Uuid>,
}
