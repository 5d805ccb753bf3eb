use serde::Serialize;
use utoipa::ToSchema;

/// Refresh affordance state for one device
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshStatusResponse {
    pub allowed: bool,
    /// Seconds until the next attempt may go through; zero when allowed
    pub seconds_remaining: i64,
    /// Successful refreshes left inside the current 24h window
    pub quota_remaining: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshTriggerResponse {
    pub success: bool,
    pub participants_processed: u64,
    pub status: RefreshStatusResponse,
}
