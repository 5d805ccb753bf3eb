use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Event, Season};

pub struct SeasonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SeasonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_current_season(&self) -> Result<Season> {
        let season = sqlx::query_as::<_, Season>(
            r#"
            SELECT season_id, year, name, is_current, created_at
            FROM seasons
            WHERE is_current = true
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(season)
    }

    /// Event ids of the current season. Scoring and usage counting are
    /// scoped to this set; picks against any other event never enter a sum.
    pub async fn current_event_ids(&self) -> Result<HashSet<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT e.event_id
            FROM events e
            INNER JOIN seasons s ON e.season_id = s.season_id
            WHERE s.is_current = true
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    pub async fn list_current_events(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.event_id, e.season_id, e.round, e.name, e.has_sprint, e.starts_at, e.lock_time
            FROM events e
            INNER JOIN seasons s ON e.season_id = s.season_id
            WHERE s.is_current = true
            ORDER BY e.round
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }
}
