use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Season {
    pub season_id: Uuid,
    pub year: i32,
    pub name: String,
    pub is_current: bool,
    pub created_at: NaiveDateTime,
}

/// One race weekend of a season.
///
/// Only events of the current season count for scoring and usage; picks that
/// reference events of retired seasons are ignored, not zeroed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub season_id: Uuid,
    pub round: i16,
    pub name: String,
    pub has_sprint: bool,
    pub starts_at: DateTime<Utc>,
    /// Selections freeze for non-admins at this instant
    pub lock_time: DateTime<Utc>,
}
