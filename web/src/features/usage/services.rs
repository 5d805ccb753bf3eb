use sqlx::PgPool;
use storage::dto::usage::{PopularityResponse, UsageResponse};
use storage::error::Result;
use storage::repository::participant::ParticipantRepository;
use storage::repository::season::SeasonRepository;
use storage::repository::selection::SelectionRepository;
use storage::services::season;
use uuid::Uuid;

/// Per-entity pick counts for one participant's in-season selections
pub async fn get_participant_usage(pool: &PgPool, participant_id: Uuid) -> Result<UsageResponse> {
    // 404 for unknown participants rather than an empty count set
    ParticipantRepository::new(pool)
        .get_participant(participant_id)
        .await?;

    let selections = SelectionRepository::new(pool)
        .get_all_selections(participant_id)
        .await?;
    let season_events = SeasonRepository::new(pool).current_event_ids().await?;

    Ok(UsageResponse {
        participant_id,
        counts: season::usage(&selections, &season_events),
    })
}

/// League-wide pick popularity across every participant
pub async fn get_popularity(pool: &PgPool) -> Result<PopularityResponse> {
    let selections = SelectionRepository::new(pool)
        .get_all_selections_for_all_participants()
        .await?;
    let season_events = SeasonRepository::new(pool).current_event_ids().await?;

    let counts = season::usage(&selections, &season_events);

    Ok(PopularityResponse::from_counts(counts))
}
