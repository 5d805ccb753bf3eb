use chrono::NaiveDateTime;
use sqlx::PgPool;
use storage::dto::scoring::{ScorePreviewRequest, ScorePreviewResponse, ScoringProfileResponse};
use storage::error::Result;
use storage::models::{ScoringProfile, SelectionRecord};
use storage::repository::catalog::CatalogRepository;
use storage::repository::results::ResultRepository;
use storage::repository::roster::RosterRepository;
use storage::services::scoring;
use uuid::Uuid;

fn profile_to_response(profile: &ScoringProfile) -> ScoringProfileResponse {
    ScoringProfileResponse {
        profile_id: profile.profile_id,
        name: profile.name.clone(),
        is_active: profile.is_active,
        catalog: profile.catalog.0.clone(),
        created_at: profile.created_at.date(),
    }
}

pub async fn list_profiles(pool: &PgPool) -> Result<Vec<ScoringProfileResponse>> {
    let profiles = CatalogRepository::new(pool).list_profiles().await?;

    Ok(profiles.iter().map(profile_to_response).collect())
}

pub async fn get_active_profile(pool: &PgPool) -> Result<ScoringProfileResponse> {
    let profile = CatalogRepository::new(pool).get_active_profile().await?;

    Ok(profile_to_response(&profile))
}

/// Score a hypothetical set of picks against an event's saved result.
/// Nothing is stored; the same snapshot-first rules apply as for real picks.
pub async fn preview(pool: &PgPool, request: ScorePreviewRequest) -> Result<ScorePreviewResponse> {
    let result = ResultRepository::new(pool).get_result(request.event_id).await?;
    let live_roster = RosterRepository::new(pool).get_live_roster().await?;
    let active_catalog = CatalogRepository::new(pool).get_active_catalog().await?;

    let selection = SelectionRecord {
        selection_id: Uuid::new_v4(),
        participant_id: Uuid::nil(),
        event_id: request.event_id,
        team_a1: request.team_a1,
        team_a2: request.team_a2,
        team_b: request.team_b,
        driver_a1: request.driver_a1,
        driver_a2: request.driver_a2,
        driver_a3: request.driver_a3,
        driver_b1: request.driver_b1,
        driver_b2: request.driver_b2,
        fastest_lap_driver: request.fastest_lap_driver,
        penalty_fraction: request.penalty_fraction,
        penalty_reason: None,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    };

    let breakdown = scoring::score(&selection, &result, &live_roster, &active_catalog);

    Ok(ScorePreviewResponse {
        event_id: request.event_id,
        grand_prix: breakdown.grand_prix,
        sprint: breakdown.sprint,
        grand_prix_qualifying: breakdown.grand_prix_qualifying,
        sprint_qualifying: breakdown.sprint_qualifying,
        fastest_lap: breakdown.fastest_lap,
        raw_total: breakdown.raw_total,
        penalty_points: breakdown.penalty_points,
        final_total: breakdown.final_total,
    })
}
