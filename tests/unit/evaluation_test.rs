//! Unit tests for the evaluation pass

use crate::helpers::{load_fixture, process_fixture, process_fixture_with_evaluations, process_str};

#[test]
fn evaluation_fixture_line_counts() {
    let (mut log, _) = process_fixture();
    let evaluations = load_fixture("AiEvaluation.log");
    let stats = log
        .process_evaluations(evaluations.as_bytes(), None, 0)
        .unwrap()
        .clone();

    assert_eq!(stats.total_lines, 14);
    assert_eq!(stats.timestamped_lines, 14);
    // The better unit found while searching in Atlantis has no known owner.
    assert_eq!(stats.recognized_lines, 13);
    assert!(stats.category_counts.is_empty());
    assert_eq!(log.evaluation.as_ref(), Some(&stats));
}

#[test]
fn evaluations_are_binned_to_primary_turns() {
    let log = process_fixture_with_evaluations();
    let alice = &log.state.players[&0].unit_evaluation;

    let recorded: Vec<(i32, bool)> = alice
        .evaluations
        .iter()
        .map(|e| (e.turn, e.is_better_unit))
        .collect();
    // The repeated evaluation at 105.05 falls in the same turn and is dropped.
    assert_eq!(recorded, vec![(1, false), (1, true), (2, false)]);
    assert_eq!(log.evaluation_count(), 4);
}

#[test]
fn better_unit_goes_to_the_city_owner() {
    let log = process_fixture_with_evaluations();

    let alice = &log.state.players[&0].unit_evaluation;
    let attack = &alice.best_units_by_ai_type["UNITAI_ATTACK"];
    assert_eq!(attack.len(), 1);
    assert_eq!(attack[0].unit_name, "Warrior");
    assert_eq!((attack[0].base_value, attack[0].final_value), (40, 50));
    assert_eq!(attack[0].first_turn, 1);

    let bob = &log.state.players[&1].unit_evaluation;
    assert_eq!(bob.evaluations.len(), 1);
    let record = &bob.evaluations[0];
    assert_eq!(record.city_name, "Babylon");
    assert_eq!(record.turn, 2);
    assert_eq!(record.calculated_value, 35);
    assert_eq!(record.unit_name.as_deref(), Some("Archer"));
}

#[test]
fn better_unit_for_unknown_city_is_dropped() {
    let log = process_fixture_with_evaluations();
    let defense_roles = log
        .state
        .players
        .values()
        .filter(|p| {
            p.unit_evaluation
                .best_units_by_ai_type
                .contains_key("UNITAI_CITY_DEFENSE")
        })
        .count();
    assert_eq!(defense_roles, 0);
}

#[test]
fn identical_evaluations_in_a_new_turn_are_kept() {
    let (mut log, _) = process_str(
        "[10.0] Player 1 (Alice) setTurnActive for turn 1\n\
         [20.0] Player 1 (Alice) setTurnActive for turn 2\n\
         [30.0] Player 1 (Alice) turn ended\n",
    );
    let line = "AI Player 1 evaluate Value for unit UNIT_ARCHER as type UNITAI_CITY_DEFENSE, combat value 3, moves 1, Calculated value 70";
    let evaluations = format!("[11.0] {line}\n[12.0] {line}\n[21.0] {line}\n");
    log.process_evaluations(evaluations.as_bytes(), None, 0)
        .unwrap();

    let turns: Vec<i32> = log.state.players[&1]
        .unit_evaluation
        .evaluations
        .iter()
        .map(|e| e.turn)
        .collect();
    assert_eq!(turns, vec![1, 2]);
}

#[test]
fn best_unit_history_only_keeps_improvements() {
    let (mut log, _) = process_str(
        "[10.0] Player 2 (Bob) setTurnActive for turn 1\n\
         [10.1] Player 2 (Bob) founds new city Ur at 1, 1\n\
         [20.0] Player 2 (Bob) turn ended\n",
    );
    let mut evaluations = String::from("[11.0] City Ur, AI_bestUnitAI searching for UNITAI_ATTACK\n");
    for value in [50, 40, 45, 30] {
        evaluations.push_str(&format!(
            "[11.5] Better AI Unit found for UNITAI_ATTACK, type UNIT_AXEMAN, Axeman, base value 10, final value {value}\n"
        ));
    }
    log.process_evaluations(evaluations.as_bytes(), None, 0)
        .unwrap();

    let kept: Vec<i32> = log.state.players[&2].unit_evaluation.best_units_by_ai_type["UNITAI_ATTACK"]
        .iter()
        .map(|b| b.final_value)
        .collect();
    assert_eq!(kept, vec![50, 40, 30]);
}

#[test]
fn timestamp_before_any_turn_falls_back_to_current_turn() {
    let (mut log, _) = process_str(
        "[10.0] Player 1 (Alice) setTurnActive for turn 1\n\
         [20.0] Player 1 (Alice) setTurnActive for turn 2\n\
         [30.0] Player 1 (Alice) turn ended\n",
    );
    log.process_evaluations(
        "[5.0] AI Player 1 evaluate Value for unit UNIT_WARRIOR as type UNITAI_ATTACK, combat value 2, moves 1, Calculated value 40\n"
            .as_bytes(),
        None,
        0,
    )
    .unwrap();

    assert_eq!(log.state.players[&1].unit_evaluation.evaluations[0].turn, 2);
}
