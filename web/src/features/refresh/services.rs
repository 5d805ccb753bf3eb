use chrono::Utc;
use storage::dto::refresh::{RefreshStatusResponse, RefreshTriggerResponse};
use storage::services::recompute;
use storage::services::refresh::RefreshDecision;

use crate::error::{WebError, WebResult};
use crate::state::AppState;

fn status_from_decision(decision: RefreshDecision) -> RefreshStatusResponse {
    RefreshStatusResponse {
        allowed: decision.allowed,
        seconds_remaining: decision.seconds_remaining,
        quota_remaining: decision.quota_remaining,
    }
}

/// Current refresh affordance for one device
pub async fn refresh_status(state: &AppState, device_key: &str) -> WebResult<RefreshStatusResponse> {
    let decision = state
        .refresh
        .decision(state.db.pool(), device_key, Utc::now())
        .await?;

    Ok(status_from_decision(decision))
}

/// Run the gated full recompute for one device.
///
/// Exactly one refresh may be in flight per process; a concurrent trigger
/// conflicts instead of queueing. A refresh denied by the policy returns the
/// countdown. A recompute that fails downstream consumes no quota and
/// reports `success: false` for the caller's transient indicator.
pub async fn trigger_refresh(state: &AppState, device_key: &str) -> WebResult<RefreshTriggerResponse> {
    let Some(_guard) = state.refresh.try_begin() else {
        return Err(WebError::Conflict("A refresh is already in progress".to_string()));
    };

    let pool = state.db.pool();
    let decision = state.refresh.decision(pool, device_key, Utc::now()).await?;
    if !decision.allowed {
        return Err(WebError::RateLimited {
            seconds_remaining: decision.seconds_remaining,
        });
    }

    let outcome = recompute::recompute_all(pool, state.sentinel_participant_id).await;
    let (success, participants_processed) = match outcome {
        Ok(count) => (true, count),
        Err(error) => {
            tracing::error!(%error, "leaderboard recompute failed");
            (false, 0)
        }
    };

    let new_state = state
        .refresh
        .commit_attempt(pool, device_key, success, Utc::now())
        .await?;
    let status = status_from_decision(storage::services::refresh::evaluate(&new_state, Utc::now()));

    Ok(RefreshTriggerResponse {
        success,
        participants_processed,
        status,
    })
}
