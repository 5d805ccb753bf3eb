use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::ResultRecord;

const RESULT_COLUMNS: &str = r#"
    result_id, event_id,
    grand_prix_order, sprint_order,
    grand_prix_qualifying_order, sprint_qualifying_order,
    fastest_lap_driver, roster_snapshot, catalog_snapshot,
    created_at
"#;

pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_result(&self, event_id: Uuid) -> Result<ResultRecord> {
        let query = format!("SELECT {RESULT_COLUMNS} FROM results WHERE event_id = $1");

        let result = sqlx::query_as::<_, ResultRecord>(&query)
            .bind(event_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(result)
    }

    pub async fn get_all_results(&self) -> Result<Vec<ResultRecord>> {
        let query = format!("SELECT {RESULT_COLUMNS} FROM results ORDER BY created_at");

        let results = sqlx::query_as::<_, ResultRecord>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(results)
    }
}
