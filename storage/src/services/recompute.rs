use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::SelectionRecord;
use crate::repository::participant::ParticipantRepository;
use crate::repository::selection::SelectionRepository;
use crate::services::leaderboard::{SlowPathInputs, resolve_slow};

/// Recompute every participant's season totals and rewrite the score cache
/// the leaderboard fast path reads, then reassign ranks in the exact order
/// the leaderboard sorts by. Returns how many participants were processed.
///
/// The sentinel service identity gets its cache refreshed like everyone else
/// but keeps a null rank so it never surfaces in ranking output.
pub async fn recompute_all(pool: &PgPool, sentinel: Option<Uuid>) -> Result<u64> {
    let inputs = SlowPathInputs::load(pool).await?;
    let participant_repo = ParticipantRepository::new(pool);
    let participants = participant_repo.list_all().await?;

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

    let mut totals: Vec<(Uuid, i32)> = Vec::with_capacity(participants.len());
    let mut count = 0u64;

    for participant in &participants {
        let selections = by_participant
            .get(&participant.participant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let score = resolve_slow(selections, &inputs);

        participant_repo
            .update_score_cache(
                participant.participant_id,
                score.total_points,
                &score.breakdown,
            )
            .await?;

        if Some(participant.participant_id) != sentinel {
            totals.push((participant.participant_id, score.total_points));
        }
        count += 1;
    }

    totals.sort_by(|(a_id, a_total), (b_id, b_total)| {
        b_total.cmp(a_total).then_with(|| a_id.cmp(b_id))
    });

    for (index, (participant_id, _)) in totals.iter().enumerate() {
        participant_repo
            .update_rank(*participant_id, Some(index as i32 + 1))
            .await?;
    }
    if let Some(sentinel_id) = sentinel {
        participant_repo.update_rank(sentinel_id, None).await?;
    }

    tracing::info!(participants = count, "leaderboard recompute finished");

    Ok(count)
}
