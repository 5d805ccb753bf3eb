use sqlx::PgPool;
use storage::dto::common::CursorPage;
use storage::dto::leaderboard::{LeaderboardEntry, LeaderboardQuery, OwnRankResponse};
use storage::error::Result;
use storage::services::leaderboard;
use uuid::Uuid;

/// Resolve one ranked leaderboard page
pub async fn get_leaderboard(
    pool: &PgPool,
    query: &LeaderboardQuery,
    sentinel: Option<Uuid>,
) -> Result<CursorPage<LeaderboardEntry>> {
    leaderboard::resolve_page(pool, query, sentinel).await
}

/// A single participant's rank, null when unknown
pub async fn get_own_rank(
    pool: &PgPool,
    participant_id: Uuid,
    sentinel: Option<Uuid>,
) -> Result<OwnRankResponse> {
    let rank = leaderboard::resolve_own_rank(pool, participant_id, sentinel).await?;

    Ok(OwnRankResponse {
        participant_id,
        rank,
    })
}
