use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One participant's picks for one race weekend.
///
/// Slots stay null until the participant fills them; after the event lock
/// time only administrators may touch the row, and then only the penalty
/// fields. `penalty_fraction` must already be validated into [0, 1] by
/// whoever writes the row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SelectionRecord {
    pub selection_id: Uuid,
    pub participant_id: Uuid,
    pub event_id: Uuid,

    // Constructor picks: two Class A slots, one Class B slot
    pub team_a1: Option<String>,
    pub team_a2: Option<String>,
    pub team_b: Option<String>,

    // Driver picks: three Class A slots, two Class B slots
    pub driver_a1: Option<String>,
    pub driver_a2: Option<String>,
    pub driver_a3: Option<String>,
    pub driver_b1: Option<String>,
    pub driver_b2: Option<String>,

    pub fastest_lap_driver: Option<String>,

    #[schema(value_type = Option<f64>)]
    pub penalty_fraction: Option<Decimal>,
    pub penalty_reason: Option<String>,

    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SelectionRecord {
    /// All constructor slots in slot order
    pub fn team_slots(&self) -> [Option<&str>; 3] {
        [
            self.team_a1.as_deref(),
            self.team_a2.as_deref(),
            self.team_b.as_deref(),
        ]
    }

    /// All individually picked driver slots in slot order
    pub fn driver_slots(&self) -> [Option<&str>; 5] {
        [
            self.driver_a1.as_deref(),
            self.driver_a2.as_deref(),
            self.driver_a3.as_deref(),
            self.driver_b1.as_deref(),
            self.driver_b2.as_deref(),
        ]
    }
}
