use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use super::points_catalog::PointsCatalog;

/// Official outcome of one race weekend, admin-authored.
///
/// `roster_snapshot` and `catalog_snapshot` are written exactly once when the
/// result is saved and never mutated afterwards, so scores computed for past
/// events stay stable when the live roster or the point rules change later.
/// Results saved before snapshotting existed have a null catalog snapshot and
/// an empty roster snapshot; scoring falls back to the live data for those.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResultRecord {
    pub result_id: Uuid,
    pub event_id: Uuid,

    /// Finishing order per session, best first, driver codes.
    /// Sessions that did not run (no sprint at a plain weekend, or a result
    /// still being entered) are null and score zero.
    #[schema(value_type = Option<Vec<String>>)]
    pub grand_prix_order: Option<Json<Vec<String>>>,
    #[schema(value_type = Option<Vec<String>>)]
    pub sprint_order: Option<Json<Vec<String>>>,
    #[schema(value_type = Option<Vec<String>>)]
    pub grand_prix_qualifying_order: Option<Json<Vec<String>>>,
    #[schema(value_type = Option<Vec<String>>)]
    pub sprint_qualifying_order: Option<Json<Vec<String>>>,

    pub fastest_lap_driver: Option<String>,

    /// Driver code -> constructor code as of the save
    #[schema(value_type = HashMap<String, String>)]
    pub roster_snapshot: Json<HashMap<String, String>>,
    /// Point rules in force at the save
    #[schema(value_type = Option<PointsCatalog>)]
    pub catalog_snapshot: Option<Json<PointsCatalog>>,

    pub created_at: NaiveDateTime,
}

impl ResultRecord {
    /// Resolve a finishing driver's constructor, preferring the snapshot
    pub fn constructor_of<'a>(
        &'a self,
        driver: &str,
        live_roster: &'a HashMap<String, String>,
    ) -> Option<&'a str> {
        self.roster_snapshot
            .get(driver)
            .or_else(|| live_roster.get(driver))
            .map(String::as_str)
    }
}
