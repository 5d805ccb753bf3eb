use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Rate-limit bookkeeping for manual leaderboard refreshes.
///
/// Keyed per device and never synchronized across devices; two devices may
/// each burn their own quota inside the same wall-clock window. Only
/// successful refreshes move `count` and `last_refresh_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RefreshPolicyState {
    pub device_key: String,
    /// Successful refreshes inside the current 24h window
    pub count: i32,
    pub last_refresh_at: Option<DateTime<Utc>>,
    pub window_started_at: Option<DateTime<Utc>>,
    pub locked_until: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshPolicyState {
    /// Untouched state for a device seen for the first time
    pub fn fresh(device_key: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            device_key: device_key.into(),
            count: 0,
            last_refresh_at: None,
            window_started_at: None,
            locked_until: None,
            updated_at: now,
        }
    }
}
