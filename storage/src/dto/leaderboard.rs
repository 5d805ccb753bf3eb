use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::CursorParams;
use crate::models::PointsBreakdown;

/// Which tier produced a leaderboard entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Cached totals written by the batch recompute
    Precomputed,
    /// Recomputed on demand from raw selections and results
    Recomputed,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    #[serde(flatten)]
    pub pagination: CursorParams,
    /// Participant id of the requesting user, if signed in
    pub viewer_id: Option<Uuid>,
    /// Live display name of the requesting user; overlays the cached name
    /// on their own row, never the cached points
    pub viewer_name: Option<String>,
}

impl LeaderboardQuery {
    pub fn validate(&self) -> Result<(), String> {
        self.pagination.validate()?;

        if self.viewer_name.is_some() && self.viewer_id.is_none() {
            return Err("viewer_name requires viewer_id".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    /// Dense 1-based position; ties get adjacent distinct ranks
    pub rank: u32,
    pub participant_id: Uuid,
    pub display_name: String,
    pub total_points: i32,
    pub breakdown: PointsBreakdown,
    pub source: ResolutionSource,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OwnRankResponse {
    pub participant_id: Uuid,
    /// Null when the rank cannot be determined cheaply or at all
    pub rank: Option<u32>,
}
