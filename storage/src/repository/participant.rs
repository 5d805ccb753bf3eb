use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Participant, PointsBreakdown};

const PARTICIPANT_COLUMNS: &str =
    "participant_id, display_name, total_points, breakdown, rank, created_at";

pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_participant(&self, participant_id: Uuid) -> Result<Participant> {
        let query = format!("SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE participant_id = $1");

        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(participant_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(participant)
    }

    /// One page of participants ordered by the maintained rank field.
    /// Unranked participants sort last, then by id so the order is stable.
    pub async fn get_participants_page(&self, offset: i64, limit: i64) -> Result<Vec<Participant>> {
        let query = format!(
            r#"
            SELECT {PARTICIPANT_COLUMNS}
            FROM participants
            ORDER BY rank ASC NULLS LAST, participant_id ASC
            LIMIT $1 OFFSET $2
            "#
        );

        let participants = sqlx::query_as::<_, Participant>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        Ok(participants)
    }

    pub async fn list_all(&self) -> Result<Vec<Participant>> {
        let query = format!("SELECT {PARTICIPANT_COLUMNS} FROM participants ORDER BY participant_id");

        let participants = sqlx::query_as::<_, Participant>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(participants)
    }

    /// Write the precomputed score cache for one participant
    pub async fn update_score_cache(
        &self,
        participant_id: Uuid,
        total_points: i32,
        breakdown: &PointsBreakdown,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE participants
            SET total_points = $1, breakdown = $2
            WHERE participant_id = $3
            "#,
        )
        .bind(total_points)
        .bind(Json(breakdown))
        .bind(participant_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_rank(&self, participant_id: Uuid, rank: Option<i32>) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE participants
            SET rank = $1
            WHERE participant_id = $2
            "#,
        )
        .bind(rank)
        .bind(participant_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
