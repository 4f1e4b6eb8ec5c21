//! Full-engine simulation tests: the daily fan-out, the year rollover
//! cascade, and a complete play loop through the action dispatcher.

use lifesim_core::{
    action::PlayerAction,
    config::GameConfig,
    engine::GameEngine,
    state::LifeStatus,
    store::GameStore,
};

fn build(run_id: &str, seed: u64) -> GameEngine {
    let store = GameStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    GameEngine::build(run_id.to_string(), seed, GameConfig::default_test(), store)
        .expect("engine")
}

#[test]
fn first_day_wakes_the_whole_town() {
    let mut engine = build("first-day", 1);
    engine.advance_day().unwrap();

    let state = &engine.state;
    assert_eq!(state.calendar.day_count, 1);
    // Trade populates the empty market immediately.
    assert_eq!(state.trade.market.len(), 3);
    // The standing seasonal offers appear on day one.
    assert!(state
        .missions
        .offered
        .iter()
        .any(|m| m.id.starts_with("colheita-")));
    assert!(state.events.active.iter().any(|e| e.id == "festa-inverno"));
}

#[test]
fn needs_drift_without_care() {
    let mut engine = build("drift", 1);
    engine.advance_days(5).unwrap();
    let c = &engine.state.character;
    assert!(c.hunger > 50);
    assert!(c.thirst > 50);
}

#[test]
fn year_rollover_ages_the_household() {
    let mut engine = build("year", 1);
    engine.advance_days(336).unwrap();

    let state = &engine.state;
    assert_eq!(state.calendar.year, 2);
    assert_eq!(state.calendar.month, 1);
    assert_eq!(state.character.age, 1);
    assert_eq!(state.family.members[0].age, 41);
    assert_eq!(state.family.members[1].age, 43);
    assert_eq!(state.family.members[2].age, 16);
    assert!(state
        .family
        .members
        .iter()
        .all(|m| m.status == LifeStatus::Alive));
}

#[test]
fn seasons_rotate_through_the_year() {
    let mut engine = build("seasons", 1);
    let mut seen = Vec::new();
    for _ in 0..336 {
        engine.advance_day().unwrap();
        let season = engine.state.calendar.season;
        if seen.last() != Some(&season) {
            seen.push(season);
        }
    }
    // Winter -> Spring -> Summer -> Autumn -> Winter over one year.
    assert_eq!(seen.len(), 5);
}

#[test]
fn farming_play_loop_pays_out() {
    let mut engine = build("farming", 1);
    engine.advance_day().unwrap();
    engine.state.resources.coins = 50;

    let outcome = engine
        .dispatch(&PlayerAction::Travel {
            destination: "Fazenda".to_string(),
        })
        .unwrap();
    assert!(outcome.is_applied());

    let outcome = engine
        .dispatch(&PlayerAction::Plant {
            kind: "Trigo".to_string(),
        })
        .unwrap();
    assert!(outcome.is_applied());
    let coins_after_seed = engine.state.resources.coins;
    assert_eq!(coins_after_seed, 40);

    // Trigo takes 3 days to mature.
    engine.advance_days(3).unwrap();
    assert_eq!(engine.state.farm.crops[0].progress, 100);

    let outcome = engine
        .dispatch(&PlayerAction::Harvest {
            kind: "Trigo".to_string(),
        })
        .unwrap();
    assert!(outcome.is_applied());
    assert!(engine.state.farm.crops.is_empty());
    assert_eq!(engine.state.resources.coins, coins_after_seed + 10);
}

#[test]
fn time_skip_requires_debug_mode() {
    let mut engine = build("skip", 1);

    let outcome = engine.dispatch(&PlayerAction::AdvanceDays { days: 5 }).unwrap();
    assert!(!outcome.is_applied());
    assert_eq!(engine.state.calendar.day_count, 0);

    let outcome = engine
        .dispatch(&PlayerAction::SetSetting {
            high_contrast: None,
            font_size: None,
            screen_reader_support: None,
            debug_mode: Some(true),
        })
        .unwrap();
    assert!(outcome.is_applied());

    let outcome = engine.dispatch(&PlayerAction::AdvanceDays { days: 5 }).unwrap();
    assert!(outcome.is_applied());
    assert_eq!(engine.state.calendar.day_count, 5);
}

#[test]
fn study_loop_levels_a_course() {
    let mut engine = build("study", 1);
    engine.advance_day().unwrap();

    engine
        .dispatch(&PlayerAction::Travel {
            destination: "Creche".to_string(),
        })
        .unwrap();
    let outcome = engine
        .dispatch(&PlayerAction::Enroll {
            course: "Comércio Básico".to_string(),
        })
        .unwrap();
    assert!(outcome.is_applied());

    // One session per day; five sessions finish a level.
    for _ in 0..5 {
        engine.state.character.energy = 100;
        let outcome = engine
            .dispatch(&PlayerAction::Study {
                course: "Comércio Básico".to_string(),
            })
            .unwrap();
        assert!(outcome.is_applied());
        engine.advance_day().unwrap();
    }

    assert_eq!(engine.state.education.enrollments[0].level, 1);
    assert_eq!(engine.state.trade.trading_skill, 5);
}
