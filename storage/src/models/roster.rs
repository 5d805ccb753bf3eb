use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A constructor entered in the championship. `class` is "A" or "B" and
/// drives which selection slots the team is eligible for.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_code: String,
    pub name: String,
    pub class: String,
}

/// A driver on the live roster. `team_code` is the driver's current
/// constructor; historical scoring prefers the roster snapshot embedded in
/// each saved result over this live mapping.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Driver {
    pub driver_code: String,
    pub full_name: String,
    pub team_code: String,
    pub class: String,
}
