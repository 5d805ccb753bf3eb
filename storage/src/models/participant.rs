use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

/// Season points split across the four scored categories.
///
/// Qualifying folds grand prix and sprint qualifying together; that is the
/// granularity the leaderboard shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PointsBreakdown {
    pub grand_prix: i32,
    pub qualifying: i32,
    pub sprint: i32,
    pub fastest_lap: i32,
}

impl PointsBreakdown {
    pub fn category_sum(&self) -> i32 {
        self.grand_prix + self.qualifying + self.sprint + self.fastest_lap
    }
}

/// A season entrant.
///
/// `total_points`, `breakdown` and `rank` are written by the batch recompute
/// and read by the leaderboard fast path. They are a cache over the raw
/// selections and results, never the source of truth, and any of them may be
/// null for a participant the batch has not reached yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Participant {
    pub participant_id: Uuid,
    pub display_name: String,

    pub total_points: Option<i32>,
    #[schema(value_type = Option<PointsBreakdown>)]
    pub breakdown: Option<Json<PointsBreakdown>>,
    pub rank: Option<i32>,

    pub created_at: NaiveDateTime,
}
