use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::PointsCatalog;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoringProfileResponse {
    pub profile_id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub catalog: PointsCatalog,
    pub created_at: NaiveDate,
}

/// Dry-run scoring request: what would these picks earn against the saved
/// result of the given event. Nothing is stored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ScorePreviewRequest {
    pub event_id: Uuid,

    pub team_a1: Option<String>,
    pub team_a2: Option<String>,
    pub team_b: Option<String>,

    pub driver_a1: Option<String>,
    pub driver_a2: Option<String>,
    pub driver_a3: Option<String>,
    pub driver_b1: Option<String>,
    pub driver_b2: Option<String>,

    pub fastest_lap_driver: Option<String>,

    #[validate(custom(function = "validate_penalty_fraction"))]
    #[schema(value_type = Option<f64>)]
    pub penalty_fraction: Option<Decimal>,
}

fn validate_penalty_fraction(fraction: &Decimal) -> Result<(), validator::ValidationError> {
    if *fraction >= Decimal::ZERO && *fraction <= Decimal::ONE {
        Ok(())
    } else {
        Err(validator::ValidationError::new("penalty_fraction_out_of_range"))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScorePreviewResponse {
    pub event_id: Uuid,
    pub grand_prix: i32,
    pub sprint: i32,
    pub grand_prix_qualifying: i32,
    pub sprint_qualifying: i32,
    pub fastest_lap: i32,
    pub raw_total: i32,
    pub penalty_points: i32,
    pub final_total: i32,
}
