use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{PointsCatalog, ResultRecord, SelectionRecord};

/// Point earnings of one participant for one event, by session category.
///
/// Category values are pre-penalty; the penalty applies once to the raw
/// total, so `final_total` is the only field it touches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventPointsBreakdown {
    pub grand_prix: i32,
    pub sprint: i32,
    pub grand_prix_qualifying: i32,
    pub sprint_qualifying: i32,
    pub fastest_lap: i32,
    pub raw_total: i32,
    pub penalty_points: i32,
    pub final_total: i32,
}

/// Score one participant's picks against one saved result.
///
/// Rules come from the result's catalog snapshot when it has one, so scores
/// for old events survive later rule changes; results from before
/// snapshotting fall back to the active catalog. Constructor membership is
/// resolved the same way: snapshot first, live roster second.
pub fn score(
    selection: &SelectionRecord,
    result: &ResultRecord,
    live_roster: &HashMap<String, String>,
    active_catalog: &PointsCatalog,
) -> EventPointsBreakdown {
    let catalog = result
        .catalog_snapshot
        .as_ref()
        .map(|snapshot| &snapshot.0)
        .unwrap_or(active_catalog);

    let grand_prix = session_points(
        selection,
        result,
        live_roster,
        result.grand_prix_order.as_ref().map(|o| o.0.as_slice()),
        &catalog.grand_prix,
    );
    let sprint = session_points(
        selection,
        result,
        live_roster,
        result.sprint_order.as_ref().map(|o| o.0.as_slice()),
        &catalog.sprint,
    );
    let grand_prix_qualifying = session_points(
        selection,
        result,
        live_roster,
        result
            .grand_prix_qualifying_order
            .as_ref()
            .map(|o| o.0.as_slice()),
        &catalog.grand_prix_qualifying,
    );
    let sprint_qualifying = session_points(
        selection,
        result,
        live_roster,
        result
            .sprint_qualifying_order
            .as_ref()
            .map(|o| o.0.as_slice()),
        &catalog.sprint_qualifying,
    );

    let fastest_lap = fastest_lap_bonus(selection, result, catalog);

    let raw_total = grand_prix + sprint + grand_prix_qualifying + sprint_qualifying + fastest_lap;
    let penalty_points = penalty_points(raw_total, selection.penalty_fraction);

    EventPointsBreakdown {
        grand_prix,
        sprint,
        grand_prix_qualifying,
        sprint_qualifying,
        fastest_lap,
        raw_total,
        penalty_points,
        final_total: raw_total - penalty_points,
    }
}

/// Team plus driver points for one session. A session absent from the
/// result scores zero.
fn session_points(
    selection: &SelectionRecord,
    result: &ResultRecord,
    live_roster: &HashMap<String, String>,
    finishing_order: Option<&[String]>,
    values: &[i32],
) -> i32 {
    let Some(order) = finishing_order else {
        return 0;
    };

    // Each constructor's session score is the sum over all of its finishers,
    // regardless of what anyone picked. A participant who picked both a
    // constructor and one of its drivers earns for both; that double count
    // mirrors how the game is played.
    let mut constructor_scores: HashMap<&str, i32> = HashMap::new();
    for (position, driver) in order.iter().enumerate() {
        let points = PointsCatalog::position_points(values, position);
        if points == 0 {
            continue;
        }
        if let Some(team) = result.constructor_of(driver, live_roster) {
            *constructor_scores.entry(team).or_insert(0) += points;
        }
    }

    let team_points: i32 = selection
        .team_slots()
        .into_iter()
        .flatten()
        .map(|team| constructor_scores.get(team).copied().unwrap_or(0))
        .sum();

    let driver_points: i32 = selection
        .driver_slots()
        .into_iter()
        .flatten()
        .map(|picked| {
            order
                .iter()
                .position(|finisher| finisher == picked)
                .map(|position| PointsCatalog::position_points(values, position))
                .unwrap_or(0)
        })
        .sum();

    team_points + driver_points
}

fn fastest_lap_bonus(
    selection: &SelectionRecord,
    result: &ResultRecord,
    catalog: &PointsCatalog,
) -> i32 {
    match (&selection.fastest_lap_driver, &result.fastest_lap_driver) {
        (Some(picked), Some(actual)) if picked == actual => catalog.fastest_lap_bonus,
        _ => 0,
    }
}

/// Penalty rounds toward the larger deduction: ceil(raw * fraction),
/// computed in decimal so 0.1 of 300 is 30, not 31.
fn penalty_points(raw_total: i32, fraction: Option<Decimal>) -> i32 {
    match fraction {
        Some(fraction) if fraction > Decimal::ZERO => (Decimal::from(raw_total) * fraction)
            .ceil()
            .to_i32()
            .unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn empty_selection() -> SelectionRecord {
        SelectionRecord {
            selection_id: Uuid::new_v4(),
            participant_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            team_a1: None,
            team_a2: None,
            team_b: None,
            driver_a1: None,
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

    fn result_with_grand_prix(order: &[&str], roster: &[(&str, &str)]) -> ResultRecord {
        ResultRecord {
            result_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            grand_prix_order: Some(Json(order.iter().map(|s| s.to_string()).collect())),
            sprint_order: None,
            grand_prix_qualifying_order: None,
            sprint_qualifying_order: None,
            fastest_lap_driver: None,
            roster_snapshot: Json(
                roster
                    .iter()
                    .map(|(d, t)| (d.to_string(), t.to_string()))
                    .collect(),
            ),
            catalog_snapshot: None,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_all_null_selection_scores_zero() {
        let selection = empty_selection();
        let result = result_with_grand_prix(&["bob", "alice"], &[("bob", "red"), ("alice", "red")]);

        let breakdown = score(
            &selection,
            &result,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        assert_eq!(breakdown, EventPointsBreakdown::default());
    }

    #[test]
    fn test_constructor_score_sums_all_finishers() {
        // Red's drivers finish P1 (25) and P5 (10): the constructor session
        // score is 35 for anyone who picked Red.
        let mut selection = empty_selection();
        selection.team_a1 = Some("red".to_string());

        let result = result_with_grand_prix(
            &["bob", "x1", "x2", "x3", "alice"],
            &[("bob", "red"), ("alice", "red")],
        );

        let breakdown = score(
            &selection,
            &result,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        assert_eq!(breakdown.grand_prix, 35);
        assert_eq!(breakdown.final_total, 35);
    }

    #[test]
    fn test_team_and_driver_pick_both_count() {
        // Picking Red and individually picking Red's P1 driver Bob earns
        // 35 (team) + 25 (driver) = 60.
        let mut selection = empty_selection();
        selection.team_a1 = Some("red".to_string());
        selection.driver_a1 = Some("bob".to_string());

        let result = result_with_grand_prix(
            &["bob", "x1", "x2", "x3", "alice"],
            &[("bob", "red"), ("alice", "red")],
        );

        let breakdown = score(
            &selection,
            &result,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        assert_eq!(breakdown.grand_prix, 60);
    }

    #[test]
    fn test_penalty_rounds_up() {
        // raw 101 at fraction 0.2 -> ceil(20.2) = 21 -> final 80
        let mut selection = empty_selection();
        selection.team_a1 = Some("red".to_string());
        selection.driver_a1 = Some("bob".to_string());
        selection.driver_a2 = Some("alice".to_string());
        selection.driver_a3 = Some("carl".to_string());
        selection.fastest_lap_driver = Some("bob".to_string());
        selection.penalty_fraction = Some(Decimal::new(2, 1));

        // bob P1 25, alice P2 18, carl P4 12; red = bob + alice = 43
        let mut result = result_with_grand_prix(
            &["bob", "alice", "x1", "carl"],
            &[("bob", "red"), ("alice", "red")],
        );
        result.fastest_lap_driver = Some("bob".to_string());
        let catalog = PointsCatalog {
            fastest_lap_bonus: 3,
            ..PointsCatalog::default()
        };

        let breakdown = score(&selection, &result, &HashMap::new(), &catalog);

        assert_eq!(breakdown.raw_total, 101);
        assert_eq!(breakdown.penalty_points, 21);
        assert_eq!(breakdown.final_total, 80);
    }

    #[test]
    fn test_penalty_exact_fraction_no_drift() {
        // 0.1 of 300 must deduct exactly 30
        assert_eq!(penalty_points(300, Some(Decimal::new(1, 1))), 30);
        assert_eq!(penalty_points(300, Some(Decimal::ZERO)), 0);
        assert_eq!(penalty_points(300, None), 0);
    }

    #[test]
    fn test_fastest_lap_requires_exact_match() {
        let catalog = PointsCatalog::default();
        let mut selection = empty_selection();
        let mut result = result_with_grand_prix(&[], &[]);

        // both null is a mismatch, not a match
        assert_eq!(fastest_lap_bonus(&selection, &result, &catalog), 0);

        selection.fastest_lap_driver = Some("bob".to_string());
        assert_eq!(fastest_lap_bonus(&selection, &result, &catalog), 0);

        result.fastest_lap_driver = Some("alice".to_string());
        assert_eq!(fastest_lap_bonus(&selection, &result, &catalog), 0);

        result.fastest_lap_driver = Some("bob".to_string());
        assert_eq!(
            fastest_lap_bonus(&selection, &result, &catalog),
            catalog.fastest_lap_bonus
        );
    }

    #[test]
    fn test_missing_sessions_score_zero() {
        let mut selection = empty_selection();
        selection.team_a1 = Some("red".to_string());
        selection.driver_a1 = Some("bob".to_string());

        // grand prix only; sprint and qualifying never ran
        let result = result_with_grand_prix(&["bob"], &[("bob", "red")]);

        let breakdown = score(
            &selection,
            &result,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        assert_eq!(breakdown.sprint, 0);
        assert_eq!(breakdown.grand_prix_qualifying, 0);
        assert_eq!(breakdown.sprint_qualifying, 0);
        assert_eq!(breakdown.grand_prix, 50);
    }

    #[test]
    fn test_catalog_snapshot_overrides_active_rules() {
        let mut selection = empty_selection();
        selection.driver_a1 = Some("bob".to_string());

        let mut result = result_with_grand_prix(&["bob"], &[("bob", "red")]);
        result.catalog_snapshot = Some(Json(PointsCatalog {
            grand_prix: vec![100],
            ..PointsCatalog::default()
        }));

        // the active catalog pays 25 for P1, the snapshot 100
        let breakdown = score(
            &selection,
            &result,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        assert_eq!(breakdown.grand_prix, 100);
    }

    #[test]
    fn test_roster_snapshot_preferred_over_live() {
        let mut selection = empty_selection();
        selection.team_a1 = Some("red".to_string());

        // live roster says bob drives for blue now, but the snapshot taken
        // at save time still attributes him to red
        let result = result_with_grand_prix(&["bob"], &[("bob", "red")]);
        let live_roster: HashMap<String, String> =
            [("bob".to_string(), "blue".to_string())].into();

        let breakdown = score(&selection, &result, &live_roster, &PointsCatalog::default());

        assert_eq!(breakdown.grand_prix, 25);
    }

    #[test]
    fn test_live_roster_fallback_for_unsnapshotted_driver() {
        let mut selection = empty_selection();
        selection.team_a1 = Some("blue".to_string());

        let result = result_with_grand_prix(&["newcomer"], &[]);
        let live_roster: HashMap<String, String> =
            [("newcomer".to_string(), "blue".to_string())].into();

        let breakdown = score(&selection, &result, &live_roster, &PointsCatalog::default());

        assert_eq!(breakdown.grand_prix, 25);
    }

    #[test]
    fn test_finishers_beyond_scoring_slots_earn_nothing() {
        let mut selection = empty_selection();
        selection.driver_a1 = Some("bob".to_string());

        let order: Vec<&str> = (0..10)
            .map(|_| "x")
            .chain(std::iter::once("bob"))
            .collect();
        let result = result_with_grand_prix(&order, &[("bob", "red")]);

        let breakdown = score(
            &selection,
            &result,
            &HashMap::new(),
            &PointsCatalog::default(),
        );

        assert_eq!(breakdown.grand_prix, 0);
    }
}
