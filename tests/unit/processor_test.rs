//! Unit tests for the primary pass over a whole log

use c2clog::model::PlayerKind;
use c2clog::ParseError;

use crate::helpers::{process_fixture, process_str};

// ============================================================================
// Annotated output
// ============================================================================

#[test]
fn every_fixture_line_is_annotated_once() {
    let (log, annotated) = process_fixture();
    let lines: Vec<&str> = annotated.lines().collect();

    assert_eq!(lines.len(), 35);
    assert_eq!(log.primary.total_lines, 35);
    assert_eq!(log.primary.timestamped_lines, 35);
    assert_eq!(lines[0], "[1|0|Empire] Player 0 (Alice) setTurnActive for turn 1");
    assert!(lines[28].starts_with("[1|1|"));
    assert!(lines[34].starts_with("[2|0|"));
}

#[test]
fn category_counts_cover_every_line() {
    let (log, _) = process_fixture();
    let counted: usize = log.primary.category_counts.values().sum();
    assert_eq!(counted, log.primary.total_lines);
}

// ============================================================================
// Turns and timings
// ============================================================================

#[test]
fn fixture_turns_and_timings() {
    let (log, _) = process_fixture();
    let state = &log.state;

    assert_eq!(state.current_turn, 2);
    assert_eq!(state.turns_found(), 3);

    let timings: Vec<(i32, i32, f64, Option<f64>)> = state
        .turn_timings
        .iter()
        .map(|t| (t.turn, t.player_id, t.begin, t.end))
        .collect();
    assert_eq!(
        timings,
        vec![
            (1, 0, 100.0, Some(100.27)),
            (1, 1, 110.0, Some(110.03)),
            (2, 0, 120.0, Some(120.02)),
        ]
    );
}

// ============================================================================
// Players
// ============================================================================

#[test]
fn fixture_players() {
    let (log, _) = process_fixture();
    let state = &log.state;
    assert_eq!(state.players.len(), 2);

    let alice = &state.players[&0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.kind, PlayerKind::Human);
    assert_eq!(alice.owned_city_names, vec!["Lutece".to_string()]);
    assert_eq!(alice.met_players.iter().copied().collect::<Vec<_>>(), vec![1]);

    let bob = &state.players[&1];
    assert_eq!(bob.owned_city_names, vec!["Babylon".to_string()]);
    assert_eq!(bob.at_war_with.iter().copied().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn stats_dump_is_archived_when_the_next_turn_starts() {
    let (log, _) = process_fixture();
    let alice = &log.state.players[&0];

    assert_eq!(alice.stats_history.len(), 2);
    assert_eq!(alice.current_stats.as_ref().unwrap().turn, 2);

    let turn_one = &alice.stats_history[1];
    assert_eq!(turn_one.turn, 1);
    assert_eq!(turn_one.cities, Some(1));
    assert_eq!(turn_one.population, Some(3));
    assert_eq!(turn_one.power, Some(12));
    assert_eq!(turn_one.gold_rate, Some(30));
    assert_eq!(turn_one.treasury, Some(250));
    assert!(!turn_one.in_financial_difficulties);
    assert_eq!(turn_one.turns_in_anarchy, Some(2));
    assert_eq!(turn_one.anarchy_percent, Some(1.5));
    assert_eq!(turn_one.civics.len(), 2);
    assert_eq!(turn_one.civics["Gouvernement"], "Despotisme");
}

#[test]
fn score_section_closes_at_has_met() {
    let (log, _) = process_fixture();
    let scores = &log.state.players[&0].score_history;

    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].turn, 1);
    assert_eq!(scores[0].population, 12);
    assert_eq!(scores[0].total, 40);
    assert_eq!(scores[0].territory, 0);
    assert_eq!(scores[0].victory_score, None);
}

#[test]
fn unit_inventory_is_attached_to_the_active_player() {
    let (log, _) = process_fixture();
    let inventories = &log.state.players[&0].unit_inventories;

    assert_eq!(inventories.len(), 1);
    assert_eq!(inventories[0].turn, 1);
    assert_eq!(inventories[0].total_units(), 3);
    assert_eq!(inventories[0].units["Warrior|UNITAI_ATTACK"].count, 2);
}

// ============================================================================
// Cities
// ============================================================================

#[test]
fn fixture_cities() {
    let (log, _) = process_fixture();
    let state = &log.state;
    assert_eq!(state.cities.len(), 2);

    let lutece = &state.cities["Lutece"];
    assert_eq!((lutece.owner_id, lutece.owner_name.as_str()), (0, "Alice"));
    assert_eq!((lutece.x, lutece.y), (10, 12));
    assert_eq!(lutece.founded_turn, Some(1));
    assert_eq!(
        (lutece.threat_level, lutece.threat_level_highest, lutece.threat_level_total),
        (5, 7, 12)
    );
    assert_eq!(lutece.current_production.as_deref(), Some("Warrior"));
    assert_eq!((lutece.workers_have, lutece.workers_needed), (1, 2));

    assert_eq!(lutece.history.len(), 1);
    let snapshot = &lutece.history[0];
    assert_eq!(snapshot.turn, 1);
    assert_eq!(snapshot.production, Some(4));
    assert_eq!((snapshot.crime, snapshot.crime_change), (Some(3), Some(1)));

    assert_eq!(state.city_to_player["Babylon"], 1);
}

#[test]
fn threat_line_creates_city_owned_by_active_player() {
    let (log, _) = process_str(
        "[1.0] Player 4 (Gaul) setTurnActive for turn 9\n\
         [1.1] City Paris has threat level 5 (highest 7, total 12)\n",
    );
    let paris = &log.state.cities["Paris"];
    assert_eq!(
        (paris.threat_level, paris.threat_level_highest, paris.threat_level_total),
        (5, 7, 12)
    );
    assert_eq!(paris.owner_id, 4);
}

#[test]
fn founding_twice_moves_the_city_without_duplicates() {
    let (log, _) = process_str(
        "[1.0] Player 1 (Alice) setTurnActive for turn 3\n\
         [1.1] Player 1 (Alice) founds new city Paris at 1, 2\n\
         [2.0] Player 1 (Alice) setTurnActive for turn 5\n\
         [2.1] Player 1 (Alice) founds new city Paris at 4, 5\n",
    );
    let state = &log.state;
    assert_eq!(state.cities.len(), 1);

    let paris = &state.cities["Paris"];
    assert_eq!((paris.x, paris.y), (4, 5));
    assert_eq!(paris.founded_turn, Some(5));
    assert_eq!(paris.owner_id, 1);
    assert_eq!(state.players[&1].owned_city_names, vec!["Paris".to_string()]);
}

#[test]
fn city_block_ended_by_blank_line_syncs_population() {
    let (log, _) = process_str(
        "[1.0] Player 1 (Alice) setTurnActive for turn 3\n\
         [1.1] City Paris:\n\
         [1.2]     Population: 6\n\
         [1.3]     Food surplus: -2\n\
         [1.4]\n\
         [1.5]     Population: 9\n",
    );
    let paris = &log.state.cities["Paris"];
    assert_eq!(paris.history.len(), 1);
    assert_eq!(paris.history[0].population, Some(6));
    assert_eq!(paris.history[0].food_surplus, Some(-2));
    assert_eq!(paris.population, 6);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn overflowing_number_aborts_with_line_number() {
    let mut processor = c2clog::LogProcessor::new();
    let err = processor
        .process_reader(
            "[1.0] Player 1 (Alice) setTurnActive for turn 1\n\
             [1.1] Gold rate: 3\n\
             [1.2] Player 1 (Alice) has 99999999999 cities, 1 pop, 1 power, 1 tech percent\n"
                .as_bytes(),
            &mut std::io::sink(),
        )
        .unwrap_err();

    assert!(matches!(err, ParseError::AtLine { line: 3, .. }));
    assert!(err.to_string().contains("99999999999"));
}
