use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::SelectionRecord;

const SELECTION_COLUMNS: &str = r#"
    selection_id, participant_id, event_id,
    team_a1, team_a2, team_b,
    driver_a1, driver_a2, driver_a3, driver_b1, driver_b2,
    fastest_lap_driver, penalty_fraction, penalty_reason,
    created_at, updated_at
"#;

pub struct SelectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SelectionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_selection(
        &self,
        participant_id: Uuid,
        event_id: Uuid,
    ) -> Result<SelectionRecord> {
        let query = format!(
            "SELECT {SELECTION_COLUMNS} FROM selections WHERE participant_id = $1 AND event_id = $2"
        );

        let selection = sqlx::query_as::<_, SelectionRecord>(&query)
            .bind(participant_id)
            .bind(event_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(selection)
    }

    pub async fn get_all_selections(&self, participant_id: Uuid) -> Result<Vec<SelectionRecord>> {
        let query = format!(
            "SELECT {SELECTION_COLUMNS} FROM selections WHERE participant_id = $1 ORDER BY created_at"
        );

        let selections = sqlx::query_as::<_, SelectionRecord>(&query)
            .bind(participant_id)
            .fetch_all(self.pool)
            .await?;

        Ok(selections)
    }

    /// Every selection of every participant, for popularity analysis and the
    /// own-rank fallback. One round trip; callers group in memory.
    pub async fn get_all_selections_for_all_participants(&self) -> Result<Vec<SelectionRecord>> {
        let query =
            format!("SELECT {SELECTION_COLUMNS} FROM selections ORDER BY participant_id, created_at");

        let selections = sqlx::query_as::<_, SelectionRecord>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(selections)
    }
}
