use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::dto::usage::UsageCounts;
use crate::models::{PointsBreakdown, PointsCatalog, ResultRecord, SelectionRecord};
use crate::services::scoring;

/// Season-wide accumulation of event scores.
///
/// Grand prix and sprint qualifying fold into the single `qualifying`
/// bucket the leaderboard shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonBreakdown {
    pub grand_prix: i32,
    pub qualifying: i32,
    pub sprint: i32,
    pub fastest_lap: i32,
    pub penalty_points: i32,
    pub final_total: i32,
}

impl SeasonBreakdown {
    pub fn breakdown(&self) -> PointsBreakdown {
        PointsBreakdown {
            grand_prix: self.grand_prix,
            qualifying: self.qualifying,
            sprint: self.sprint,
            fastest_lap: self.fastest_lap,
        }
    }
}

/// Roll one participant's selections up into season totals.
///
/// Selections against events outside the current season never enter the sum,
/// and events that have no adjudicated result yet are skipped, not scored
/// as zero.
pub fn rollup(
    selections: &[SelectionRecord],
    results_by_event: &HashMap<Uuid, ResultRecord>,
    season_events: &HashSet<Uuid>,
    live_roster: &HashMap<String, String>,
    active_catalog: &PointsCatalog,
) -> SeasonBreakdown {
    let mut season = SeasonBreakdown::default();

    for selection in selections {
        if !season_events.contains(&selection.event_id) {
            continue;
        }
        let Some(result) = results_by_event.get(&selection.event_id) else {
            continue;
        };

        let event = scoring::score(selection, result, live_roster, active_catalog);

        season.grand_prix += event.grand_prix;
        season.qualifying += event.grand_prix_qualifying + event.sprint_qualifying;
        season.sprint += event.sprint;
        season.fastest_lap += event.fastest_lap;
        season.penalty_points += event.penalty_points;
        season.final_total += event.final_total;
    }

    season
}

/// Count how often each team and driver appears across a participant's
/// in-season picks. The fastest-lap slot is a prediction, not a roster pick,
/// and does not count against usage caps.
pub fn usage(selections: &[SelectionRecord], season_events: &HashSet<Uuid>) -> UsageCounts {
    let mut counts = UsageCounts::default();

    for selection in selections {
        if !season_events.contains(&selection.event_id) {
            continue;
        }

        for team in selection.team_slots().into_iter().flatten() {
            *counts.teams.entry(team.to_string()).or_insert(0) += 1;
        }
        for driver in selection.driver_slots().into_iter().flatten() {
            *counts.drivers.entry(driver.to_string()).or_insert(0) += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use sqlx::types::Json;

    fn selection_for(event_id: Uuid) -> SelectionRecord {
        SelectionRecord {
            selection_id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
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
        }
    }

    fn result_for(event_id: Uuid) -> ResultRecord {
        ResultRecord {
            result_id: Uuid::new_v4(),
            event_id,
            grand_prix_order: Some(Json(vec!["bob".to_string()])),
            sprint_order: None,
            grand_prix_qualifying_order: Some(Json(vec!["bob".to_string()])),
            sprint_qualifying_order: None,
            fastest_lap_driver: None,
            roster_snapshot: Json([("bob".to_string(), "red".to_string())].into()),
            catalog_snapshot: None,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_rollup_accumulates_scored_events() {
        let event_a = Uuid::new_v4();
        let event_b = Uuid::new_v4();
        let selections = vec![selection_for(event_a), selection_for(event_b)];
        let results = HashMap::from([(event_a, result_for(event_a)), (event_b, result_for(event_b))]);
        let season_events = HashSet::from([event_a, event_b]);

        let season = rollup(
            &selections,
            &results,
            &season_events,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        // per event: bob P1 grand prix 25 twice (team + driver), quali 3 twice
        assert_eq!(season.grand_prix, 100);
        assert_eq!(season.qualifying, 12);
        assert_eq!(season.final_total, 112);
        assert_eq!(season.breakdown().category_sum(), 112);
    }

    #[test]
    fn test_rollup_ignores_out_of_season_events() {
        let in_season = Uuid::new_v4();
        let retired = Uuid::new_v4();
        let selections = vec![selection_for(in_season), selection_for(retired)];
        let results = HashMap::from([
            (in_season, result_for(in_season)),
            (retired, result_for(retired)),
        ]);
        let season_events = HashSet::from([in_season]);

        let season = rollup(
            &selections,
            &results,
            &season_events,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        assert_eq!(season.final_total, 56);
    }

    #[test]
    fn test_rollup_skips_unadjudicated_events() {
        let scored = Uuid::new_v4();
        let pending = Uuid::new_v4();
        let selections = vec![selection_for(scored), selection_for(pending)];
        let results = HashMap::from([(scored, result_for(scored))]);
        let season_events = HashSet::from([scored, pending]);

        let season = rollup(
            &selections,
            &results,
            &season_events,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        assert_eq!(season.final_total, 56);
    }

    #[test]
    fn test_usage_counts_filled_slots_per_event() {
        let event_a = Uuid::new_v4();
        let event_b = Uuid::new_v4();
        let mut first = selection_for(event_a);
        first.team_b = Some("teal".to_string());
        first.fastest_lap_driver = Some("bob".to_string());
        let second = selection_for(event_b);

        let season_events = HashSet::from([event_a, event_b]);
        let counts = usage(&[first, second], &season_events);

        assert_eq!(counts.teams.get("red"), Some(&2));
        assert_eq!(counts.teams.get("teal"), Some(&1));
        assert_eq!(counts.drivers.get("bob"), Some(&2));
        // the fastest-lap prediction does not consume usage
        assert_eq!(counts.drivers.len(), 1);
    }

    #[test]
    fn test_usage_ignores_out_of_season_events() {
        let in_season = Uuid::new_v4();
        let retired = Uuid::new_v4();
        let season_events = HashSet::from([in_season]);

        let counts = usage(
            &[selection_for(in_season), selection_for(retired)],
            &season_events,
        );

        assert_eq!(counts.teams.get("red"), Some(&1));
        assert_eq!(counts.drivers.get("bob"), Some(&1));
    }
}
