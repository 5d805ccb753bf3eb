use sqlx::PgPool;

use crate::error::Result;
use crate::models::RefreshPolicyState;

pub struct RefreshStateRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RefreshStateRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn load(&self, device_key: &str) -> Result<Option<RefreshPolicyState>> {
        let state = sqlx::query_as::<_, RefreshPolicyState>(
            r#"
            SELECT device_key, count, last_refresh_at, window_started_at, locked_until, updated_at
            FROM refresh_policy_state
            WHERE device_key = $1
            "#,
        )
        .bind(device_key)
        .fetch_optional(self.pool)
        .await?;

        Ok(state)
    }

    pub async fn save(&self, state: &RefreshPolicyState) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_policy_state
                (device_key, count, last_refresh_at, window_started_at, locked_until, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (device_key)
            DO UPDATE SET
                count = EXCLUDED.count,
                last_refresh_at = EXCLUDED.last_refresh_at,
                window_started_at = EXCLUDED.window_started_at,
                locked_until = EXCLUDED.locked_until,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&state.device_key)
        .bind(state.count)
        .bind(state.last_refresh_at)
        .bind(state.window_started_at)
        .bind(state.locked_until)
        .bind(state.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
