use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

/// Point values awarded per finishing position, per session.
///
/// A catalog is immutable once it has been embedded as a snapshot inside a
/// saved race result; admins change rules by activating a new profile, never
/// by editing a catalog that results already reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PointsCatalog {
    /// Grand prix finishing points, index 0 = P1 (10 scoring positions)
    pub grand_prix: Vec<i32>,
    /// Sprint race finishing points (8 scoring positions)
    pub sprint: Vec<i32>,
    /// Grand prix qualifying points (top 3)
    pub grand_prix_qualifying: Vec<i32>,
    /// Sprint qualifying points (top 3)
    pub sprint_qualifying: Vec<i32>,
    /// Flat bonus for nailing the fastest-lap pick
    pub fastest_lap_bonus: i32,
}

impl PointsCatalog {
    /// Points for a finishing position in a session, zero past the scoring slots
    pub fn position_points(values: &[i32], position: usize) -> i32 {
        values.get(position).copied().unwrap_or(0)
    }
}

impl Default for PointsCatalog {
    fn default() -> Self {
        Self {
            grand_prix: vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
            sprint: vec![8, 7, 6, 5, 4, 3, 2, 1],
            grand_prix_qualifying: vec![3, 2, 1],
            sprint_qualifying: vec![3, 2, 1],
            fastest_lap_bonus: 5,
        }
    }
}

/// Named, versioned scoring catalog. Exactly one profile is active at a time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScoringProfile {
    pub profile_id: Uuid,
    pub name: String,
    #[schema(value_type = PointsCatalog)]
    pub catalog: Json<PointsCatalog>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}
