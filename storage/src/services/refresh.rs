use chrono::{DateTime, Duration, Utc};

use crate::models::RefreshPolicyState;

/// Seconds a device must wait after a successful refresh
pub const REFRESH_COOLDOWN_SECONDS: i64 = 60;
/// Successful refreshes allowed per rolling window
pub const DAILY_REFRESH_CAP: i32 = 5;
/// Length of the rolling window and of the lockout
pub const REFRESH_WINDOW_SECONDS: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshDecision {
    pub allowed: bool,
    /// Seconds until the next attempt may go through, zero when allowed
    pub seconds_remaining: i64,
    pub quota_remaining: u32,
}

/// Collapse expired windows and lockouts back to a fresh state.
///
/// A lapsed lockout wipes everything. A lapsed window resets the counter but
/// keeps `last_refresh_at`, so the short cooldown stays honest across the
/// window boundary.
pub fn normalize(state: RefreshPolicyState, now: DateTime<Utc>) -> RefreshPolicyState {
    if let Some(locked_until) = state.locked_until {
        if now >= locked_until {
            return RefreshPolicyState::fresh(state.device_key, now);
        }
        return state;
    }

    if let Some(window_started_at) = state.window_started_at
        && now - window_started_at >= Duration::seconds(REFRESH_WINDOW_SECONDS)
    {
        return RefreshPolicyState {
            count: 0,
            window_started_at: None,
            locked_until: None,
            updated_at: now,
            ..state
        };
    }

    state
}

/// Pure gate decision for one device at one instant.
///
/// The countdown is `max(locked_until, last_refresh_at + cooldown) - now`;
/// the lockout therefore always overrides the plain cooldown.
pub fn evaluate(state: &RefreshPolicyState, now: DateTime<Utc>) -> RefreshDecision {
    let state = normalize(state.clone(), now);

    let cooldown_end = state
        .last_refresh_at
        .map(|at| at + Duration::seconds(REFRESH_COOLDOWN_SECONDS));
    let blocked_until = match (cooldown_end, state.locked_until) {
        (Some(cooldown), Some(lock)) => Some(cooldown.max(lock)),
        (cooldown, lock) => cooldown.or(lock),
    };

    let seconds_remaining = blocked_until
        .map(|until| (until - now).num_seconds().max(0))
        .unwrap_or(0);

    RefreshDecision {
        allowed: seconds_remaining == 0,
        seconds_remaining,
        quota_remaining: (DAILY_REFRESH_CAP - state.count).max(0) as u32,
    }
}

/// Fold one refresh attempt into the state.
///
/// Failed attempts change nothing: they consume no quota and start no
/// cooldown, so an immediate retry is allowed. A success opens the window on
/// first use and slams the lockout shut the moment the cap is reached.
pub fn record_attempt(
    state: RefreshPolicyState,
    success: bool,
    now: DateTime<Utc>,
) -> RefreshPolicyState {
    if !success {
        return state;
    }

    let mut state = normalize(state, now);

    state.count += 1;
    state.last_refresh_at = Some(now);
    state.window_started_at = state.window_started_at.or(Some(now));
    if state.count >= DAILY_REFRESH_CAP {
        state.locked_until = Some(now + Duration::seconds(REFRESH_WINDOW_SECONDS));
    }
    state.updated_at = now;

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, min, sec).unwrap()
    }

    fn fresh() -> RefreshPolicyState {
        RefreshPolicyState::fresh("device-1", at(10, 0, 0))
    }

    #[test]
    fn test_fresh_state_allows_refresh() {
        let decision = evaluate(&fresh(), at(10, 0, 0));
        assert!(decision.allowed);
        assert_eq!(decision.seconds_remaining, 0);
        assert_eq!(decision.quota_remaining, DAILY_REFRESH_CAP as u32);
    }

    #[test]
    fn test_cooldown_after_success() {
        let state = record_attempt(fresh(), true, at(10, 0, 0));

        let blocked = evaluate(&state, at(10, 0, 30));
        assert!(!blocked.allowed);
        assert_eq!(blocked.seconds_remaining, 30);

        let open = evaluate(&state, at(10, 1, 0));
        assert!(open.allowed);
        assert_eq!(open.quota_remaining, DAILY_REFRESH_CAP as u32 - 1);
    }

    #[test]
    fn test_failed_attempt_changes_nothing() {
        let before = fresh();
        let after = record_attempt(before.clone(), false, at(10, 0, 0));

        assert_eq!(before, after);
        assert!(evaluate(&after, at(10, 0, 1)).allowed);
    }

    #[test]
    fn test_cap_triggers_full_lockout_not_cooldown() {
        let mut state = fresh();
        for i in 0..DAILY_REFRESH_CAP {
            let now = at(10, 2 * i as u32, 0);
            assert!(evaluate(&state, now).allowed, "refresh {i} should pass");
            state = record_attempt(state, true, now);
        }

        // sixth attempt, right after the fifth success: blocked for the full
        // 24h lockout, not the 60s cooldown
        let decision = evaluate(&state, at(10, 8, 0));
        assert!(!decision.allowed);
        assert_eq!(decision.seconds_remaining, REFRESH_WINDOW_SECONDS);
        assert_eq!(decision.quota_remaining, 0);
    }

    #[test]
    fn test_lockout_expiry_resets_fresh() {
        let mut state = fresh();
        for i in 0..DAILY_REFRESH_CAP {
            state = record_attempt(state, true, at(10, i as u32, 0));
        }
        assert!(state.locked_until.is_some());

        let after_lockout = at(10, 4, 0) + Duration::seconds(REFRESH_WINDOW_SECONDS);
        let decision = evaluate(&state, after_lockout);
        assert!(decision.allowed);
        assert_eq!(decision.quota_remaining, DAILY_REFRESH_CAP as u32);
    }

    #[test]
    fn test_window_reset_keeps_cooldown() {
        // two successes early in the day
        let mut state = record_attempt(fresh(), true, at(1, 0, 0));
        state = record_attempt(state, true, at(2, 0, 0));

        // 24h past the window start the counter resets, but a refresh that
        // just happened still cools down
        let next_day = at(1, 0, 0) + Duration::seconds(REFRESH_WINDOW_SECONDS);
        state.last_refresh_at = Some(next_day - Duration::seconds(30));

        let decision = evaluate(&state, next_day);
        assert!(!decision.allowed);
        assert_eq!(decision.seconds_remaining, 30);
        assert_eq!(decision.quota_remaining, DAILY_REFRESH_CAP as u32);
    }

    #[test]
    fn test_quota_decrements_per_success_only() {
        let mut state = fresh();
        state = record_attempt(state, true, at(10, 0, 0));
        state = record_attempt(state, false, at(10, 5, 0));
        state = record_attempt(state, true, at(10, 10, 0));

        let decision = evaluate(&state, at(10, 20, 0));
        assert_eq!(decision.quota_remaining, DAILY_REFRESH_CAP as u32 - 2);
    }
}
