use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::CursorPage;
use crate::dto::leaderboard::{LeaderboardEntry, LeaderboardQuery, ResolutionSource};
use crate::error::Result;
use crate::models::{Participant, PointsCatalog, ResultRecord, SelectionRecord};
use crate::repository::participant::ParticipantRepository;
use crate::repository::results::ResultRepository;
use crate::repository::roster::RosterRepository;
use crate::repository::season::SeasonRepository;
use crate::repository::selection::SelectionRepository;
use crate::repository::catalog::CatalogRepository;
use crate::services::season;

/// One participant's resolved standing, regardless of which tier produced it.
/// Both tiers return this shape so everything downstream is path-agnostic.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedScore {
    pub total_points: i32,
    pub breakdown: crate::models::PointsBreakdown,
    pub source: ResolutionSource,
}

/// Shared inputs of the slow path, fetched once per request and reused for
/// every participant that needs recomputation.
pub struct SlowPathInputs {
    pub results_by_event: HashMap<Uuid, ResultRecord>,
    pub season_events: HashSet<Uuid>,
    pub live_roster: HashMap<String, String>,
    pub active_catalog: PointsCatalog,
}

impl SlowPathInputs {
    pub async fn load(pool: &PgPool) -> Result<Self> {
        let results = ResultRepository::new(pool).get_all_results().await?;
        let season_events = SeasonRepository::new(pool).current_event_ids().await?;
        let live_roster = RosterRepository::new(pool).get_live_roster().await?;
        let active_catalog = CatalogRepository::new(pool).get_active_catalog().await?;

        Ok(Self {
            results_by_event: results.into_iter().map(|r| (r.event_id, r)).collect(),
            season_events,
            live_roster,
            active_catalog,
        })
    }
}

/// Fast path: trust the precomputed cache when both fields are present
pub fn resolve_cached(participant: &Participant) -> Option<ResolvedScore> {
    let total_points = participant.total_points?;
    let breakdown = participant.breakdown.as_ref()?.0;

    Some(ResolvedScore {
        total_points,
        breakdown,
        source: ResolutionSource::Precomputed,
    })
}

/// Slow path: recompute from raw selections against live results and rules
pub fn resolve_slow(selections: &[SelectionRecord], inputs: &SlowPathInputs) -> ResolvedScore {
    let rolled = season::rollup(
        selections,
        &inputs.results_by_event,
        &inputs.season_events,
        &inputs.live_roster,
        &inputs.active_catalog,
    );

    ResolvedScore {
        total_points: rolled.final_total,
        breakdown: rolled.breakdown(),
        source: ResolutionSource::Recomputed,
    }
}

/// Order a resolved page and hand out dense ranks.
///
/// The sentinel service identity never appears in ranking output. Ties get
/// adjacent distinct ranks, broken by participant id so the order is stable
/// across refetches. The viewer overlay replaces only the cached display
/// name; cached points always win over whatever the client believes.
pub fn rank_page(
    resolved: Vec<(Participant, ResolvedScore)>,
    offset: u32,
    sentinel: Option<Uuid>,
    viewer_id: Option<Uuid>,
    viewer_name: Option<&str>,
) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(Participant, ResolvedScore)> = resolved
        .into_iter()
        .filter(|(p, _)| Some(p.participant_id) != sentinel)
        .collect();

    rows.sort_by(|(a, ra), (b, rb)| {
        rb.total_points
            .cmp(&ra.total_points)
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });

    rows.into_iter()
        .enumerate()
        .map(|(index, (participant, score))| {
            let display_name = match (viewer_id, viewer_name) {
                (Some(id), Some(name)) if id == participant.participant_id => name.to_string(),
                _ => participant.display_name,
            };

            LeaderboardEntry {
                rank: offset + index as u32 + 1,
                participant_id: participant.participant_id,
                display_name,
                total_points: score.total_points,
                breakdown: score.breakdown,
                source: score.source,
            }
        })
        .collect()
}

/// Resolve one leaderboard page.
///
/// `has_more` reflects how many rows the store returned for the page, so a
/// participant dropped by the sentinel filter or a failed slow-path
/// resolution cannot end the listing early.
pub async fn resolve_page(
    pool: &PgPool,
    query: &LeaderboardQuery,
    sentinel: Option<Uuid>,
) -> Result<CursorPage<LeaderboardEntry>> {
    let cursor = query.pagination.cursor();
    let page_size = query.pagination.page_size;

    let participants = ParticipantRepository::new(pool)
        .get_participants_page(cursor.offset() as i64, page_size as i64)
        .await?;
    let fetched = participants.len();

    let mut inputs: Option<SlowPathInputs> = None;
    let mut resolved = Vec::with_capacity(fetched);

    for participant in participants {
        if let Some(score) = resolve_cached(&participant) {
            resolved.push((participant, score));
            continue;
        }

        // A failed shared-input load fails the whole page; a failed
        // per-participant fetch drops only that row.
        if inputs.is_none() {
            inputs = Some(SlowPathInputs::load(pool).await?);
        }
        let Some(inputs) = inputs.as_ref() else {
            continue;
        };

        match SelectionRepository::new(pool)
            .get_all_selections(participant.participant_id)
            .await
        {
            Ok(selections) => {
                let score = resolve_slow(&selections, inputs);
                resolved.push((participant, score));
            }
            Err(error) => {
                tracing::warn!(
                    participant_id = %participant.participant_id,
                    %error,
                    "slow-path resolution failed, dropping participant from page"
                );
            }
        }
    }

    let entries = rank_page(
        resolved,
        cursor.offset(),
        sentinel,
        query.viewer_id,
        query.viewer_name.as_deref(),
    );

    Ok(CursorPage::new(entries, cursor, page_size, fetched))
}

/// A participant's own rank, as cheaply as possible.
///
/// Cached rank wins outright. Without it, and only when the participant's
/// points are known or computed to be positive, every scoring participant is
/// recomputed through the slow path and the 1-based index in the resulting
/// order is returned. Store failures along the fallback surface as unknown
/// instead of failing the caller.
pub async fn resolve_own_rank(
    pool: &PgPool,
    participant_id: Uuid,
    sentinel: Option<Uuid>,
) -> Result<Option<u32>> {
    let participant = ParticipantRepository::new(pool)
        .get_participant(participant_id)
        .await?;

    if let Some(rank) = participant.rank {
        return Ok(Some(rank as u32));
    }
    if Some(participant_id) == sentinel {
        return Ok(None);
    }
    // Cached points that are not positive cannot place; skip the expense.
    if matches!(participant.total_points, Some(points) if points <= 0) {
        return Ok(None);
    }

    match own_rank_fallback(pool, participant_id, sentinel).await {
        Ok(rank) => Ok(rank),
        Err(error) => {
            tracing::warn!(%participant_id, %error, "own-rank fallback failed");
            Ok(None)
        }
    }
}

async fn own_rank_fallback(
    pool: &PgPool,
    participant_id: Uuid,
    sentinel: Option<Uuid>,
) -> Result<Option<u32>> {
    let inputs = SlowPathInputs::load(pool).await?;
    let all_selections = SelectionRepository::new(pool)
        .get_all_selections_for_all_participants()
        .await?;

    let mut by_participant: HashMap<Uuid, Vec<SelectionRecord>> = HashMap::new();
    for selection in all_selections {
        by_participant
            .entry(selection.participant_id)
            .or_default()
            .push(selection);
    }

    let own = by_participant
        .get(&participant_id)
        .map(|selections| resolve_slow(selections, &inputs))
        .map(|score| score.total_points)
        .unwrap_or(0);
    if own <= 0 {
        return Ok(None);
    }

    let mut totals: Vec<(Uuid, i32)> = by_participant
        .iter()
        .filter(|(id, _)| Some(**id) != sentinel)
        .map(|(id, selections)| (*id, resolve_slow(selections, &inputs).total_points))
        .collect();

    totals.sort_by(|(a_id, a_total), (b_id, b_total)| {
        b_total.cmp(a_total).then_with(|| a_id.cmp(b_id))
    });

    Ok(totals
        .iter()
        .position(|(id, _)| *id == participant_id)
        .map(|index| index as u32 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use sqlx::types::Json;

    use crate::models::PointsBreakdown;

    fn participant(id: u128, name: &str, total: Option<i32>) -> Participant {
        Participant {
            participant_id: Uuid::from_u128(id),
            display_name: name.to_string(),
            total_points: total,
            breakdown: total.map(|points| {
                Json(PointsBreakdown {
                    grand_prix: points,
                    ..PointsBreakdown::default()
                })
            }),
            rank: None,
            created_at: NaiveDateTime::default(),
        }
    }

    fn cached(participant: &Participant) -> ResolvedScore {
        resolve_cached(participant).expect("participant has cached points")
    }

    #[test]
    fn test_ties_get_adjacent_distinct_ranks() {
        let first = participant(1, "first", Some(120));
        let tied_a = participant(2, "tied-a", Some(100));
        let tied_b = participant(3, "tied-b", Some(100));

        let resolved = vec![
            (tied_b.clone(), cached(&tied_b)),
            (first.clone(), cached(&first)),
            (tied_a.clone(), cached(&tied_a)),
        ];
        let entries = rank_page(resolved, 2, None, None, None);

        let ranks: Vec<(u32, &str)> = entries
            .iter()
            .map(|e| (e.rank, e.display_name.as_str()))
            .collect();
        // ranks continue from the cursor offset; the tie is split by id
        assert_eq!(ranks, vec![(3, "first"), (4, "tied-a"), (5, "tied-b")]);
    }

    #[test]
    fn test_sentinel_identity_never_ranks() {
        let sentinel_id = Uuid::from_u128(9);
        let admin = participant(9, "service", Some(999));
        let player = participant(1, "player", Some(10));

        let resolved = vec![(admin.clone(), cached(&admin)), (player.clone(), cached(&player))];
        let entries = rank_page(resolved, 0, Some(sentinel_id), None, None);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_name, "player");
        assert_eq!(entries[0].rank, 1);
    }

    #[test]
    fn test_viewer_overlay_touches_name_only() {
        let me = participant(5, "stale-name", Some(50));
        let resolved = vec![(me.clone(), cached(&me))];

        let entries = rank_page(
            resolved,
            0,
            None,
            Some(Uuid::from_u128(5)),
            Some("fresh-name"),
        );

        assert_eq!(entries[0].display_name, "fresh-name");
        assert_eq!(entries[0].total_points, 50);
    }

    #[test]
    fn test_fast_path_requires_both_cache_fields() {
        let mut p = participant(1, "partial", Some(10));
        p.breakdown = None;
        assert!(resolve_cached(&p).is_none());

        let p = participant(1, "missing", None);
        assert!(resolve_cached(&p).is_none());

        let p = participant(1, "complete", Some(10));
        let score = resolve_cached(&p).unwrap();
        assert_eq!(score.total_points, 10);
        assert_eq!(score.source, ResolutionSource::Precomputed);
    }

    #[test]
    fn test_fast_and_slow_paths_agree() {
        use crate::models::SelectionRecord;

        let event_id = Uuid::from_u128(77);
        let selection = SelectionRecord {
            selection_id: Uuid::new_v4(),
            participant_id: Uuid::from_u128(1),
            event_id,
            team_a1: Some("red".to_string()),
            team_a2: None,
            team_b: None,
            driver_a1: Some("bob".to_string()),
            driver_a2: None,
            driver_a3: None,
            driver_b1: None,
            driver_b2: None,
            fastest_lap_driver: None,
            penalty_fraction: None,
            penalty_reason: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        };
        let result = ResultRecord {
            result_id: Uuid::new_v4(),
            event_id,
            grand_prix_order: Some(Json(vec!["bob".to_string()])),
            sprint_order: None,
            grand_prix_qualifying_order: None,
            sprint_qualifying_order: None,
            fastest_lap_driver: None,
            roster_snapshot: Json([("bob".to_string(), "red".to_string())].into()),
            catalog_snapshot: None,
            created_at: NaiveDateTime::default(),
        };
        let inputs = SlowPathInputs {
            results_by_event: HashMap::from([(event_id, result)]),
            season_events: HashSet::from([event_id]),
            live_roster: HashMap::new(),
            active_catalog: PointsCatalog::default(),
        };

        let slow = resolve_slow(std::slice::from_ref(&selection), &inputs);

        // the batch recompute would cache exactly the slow-path numbers
        let mut p = participant(1, "someone", Some(slow.total_points));
        p.breakdown = Some(Json(slow.breakdown));
        let fast = resolve_cached(&p).unwrap();

        assert_eq!(fast.total_points, slow.total_points);
        assert_eq!(fast.breakdown, slow.breakdown);
    }
}
