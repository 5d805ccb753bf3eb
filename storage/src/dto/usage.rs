use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// How often each entrant appears across a participant's in-season picks.
///
/// Consumed by the selection form to enforce per-class usage caps; the caps
/// themselves live with the form, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct UsageCounts {
    pub teams: HashMap<String, u32>,
    pub drivers: HashMap<String, u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsageResponse {
    pub participant_id: Uuid,
    #[serde(flatten)]
    pub counts: UsageCounts,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PopularityEntry {
    pub code: String,
    pub picks: u32,
}

/// League-wide pick popularity, most picked first
#[derive(Debug, Serialize, ToSchema)]
pub struct PopularityResponse {
    pub teams: Vec<PopularityEntry>,
    pub drivers: Vec<PopularityEntry>,
}

impl PopularityResponse {
    pub fn from_counts(counts: UsageCounts) -> Self {
        Self {
            teams: sorted_entries(counts.teams),
            drivers: sorted_entries(counts.drivers),
        }
    }
}

fn sorted_entries(counts: HashMap<String, u32>) -> Vec<PopularityEntry> {
    let mut entries: Vec<PopularityEntry> = counts
        .into_iter()
        .map(|(code, picks)| PopularityEntry { code, picks })
        .collect();
    entries.sort_by(|a, b| b.picks.cmp(&a.picks).then_with(|| a.code.cmp(&b.code)));
    entries
}
