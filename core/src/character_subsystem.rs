//! Character subsystem: daily needs drift, critical-stat warnings, aging.
//!
//! Needs drift every day; crossing the warning threshold emits a
//! stat_critical event, and a need pegged at 100 starts draining health.
//! The character ages when the calendar year rolls over.

use crate::{
    action::ActionOutcome,
    config::GameConfig,
    error::SimResult,
    event::GameEvent,
    rng::SubsystemRng,
    state::GameState,
    subsystem::GameSubsystem,
    types::Day,
};

const HUNGER_PER_DAY: i64 = 4;
const THIRST_PER_DAY: i64 = 6;
const ENERGY_RECOVERY_PER_DAY: i64 = 10;
const WARNING_THRESHOLD: i64 = 80;
const HEALTH_DRAIN_WHEN_PEGGED: i64 = 5;
const MOOD_DRAIN_WHEN_CRITICAL: i64 = 3;

pub struct CharacterSubsystem;

impl CharacterSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CharacterSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSubsystem for CharacterSubsystem {
    fn name(&self) -> &'static str {
        "character"
    }

    fn on_day(
        &mut self,
        state: &mut GameState,
        _config: &GameConfig,
        day: Day,
        events_in: &[GameEvent],
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        let c = &mut state.character;

        c.add_hunger(HUNGER_PER_DAY);
        c.add_thirst(THIRST_PER_DAY);
        c.add_energy(ENERGY_RECOVERY_PER_DAY);

        if c.hunger >= 100 || c.thirst >= 100 {
            c.add_health(-HEALTH_DRAIN_WHEN_PEGGED);
        }
        if c.hunger >= WARNING_THRESHOLD {
            c.add_mood(-MOOD_DRAIN_WHEN_CRITICAL);
            events.push(GameEvent::StatCritical {
                day_count: day,
                stat: "hunger".to_string(),
                value: c.hunger,
            });
        }
        if c.thirst >= WARNING_THRESHOLD {
            c.add_mood(-MOOD_DRAIN_WHEN_CRITICAL);
            events.push(GameEvent::StatCritical {
                day_count: day,
                stat: "thirst".to_string(),
                value: c.thirst,
            });
        }

        if events_in
            .iter()
            .any(|e| matches!(e, GameEvent::YearRolledOver { .. }))
        {
            c.age += 1;
            events.push(GameEvent::CharacterAged {
                day_count: day,
                new_age: c.age,
            });
        }

        Ok(events)
    }
}

/// Sleep at home: restores energy and lifts mood.
pub fn rest(state: &mut GameState) -> ActionOutcome {
    if state.location != "Lar Familiar" {
        return ActionOutcome::rejected("You can only rest at home.");
    }
    state.character.add_energy(20);
    state.character.add_mood(10);
    ActionOutcome::applied(Vec::new(), vec!["You rest and feel restored.".to_string()])
}

/// A home-cooked meal: costs a few coins, knocks hunger down.
pub fn eat(state: &mut GameState) -> ActionOutcome {
    if state.location != "Lar Familiar" {
        return ActionOutcome::rejected("You can only eat at home.");
    }
    if !state.resources.try_spend(5) {
        return ActionOutcome::rejected("A meal costs 5 coins.");
    }
    state.character.add_hunger(-20);
    ActionOutcome::applied(Vec::new(), vec!["You eat a good meal.".to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, SubsystemSlot};

    fn run_day(state: &mut GameState, day: Day, events_in: &[GameEvent]) -> Vec<GameEvent> {
        let config = GameConfig::default_test();
        let mut rng = RngBank::new(1).stream(SubsystemSlot::Character, day);
        CharacterSubsystem::new()
            .on_day(state, &config, day, events_in, &mut rng)
            .unwrap()
    }

    #[test]
    fn needs_drift_daily() {
        let mut state = GameState::new_run();
        run_day(&mut state, 1, &[]);
        assert_eq!(state.character.hunger, 54);
        assert_eq!(state.character.thirst, 56);
        assert_eq!(state.character.energy, 100);
    }

    #[test]
    fn pegged_hunger_drains_health() {
        let mut state = GameState::new_run();
        state.character.hunger = 100;
        let events = run_day(&mut state, 1, &[]);
        assert_eq!(state.character.health, 95);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::StatCritical { stat, .. } if stat == "hunger")));
    }

    #[test]
    fn ages_on_year_rollover() {
        let mut state = GameState::new_run();
        let rollover = GameEvent::YearRolledOver {
            day_count: 336,
            year: 2,
        };
        let events = run_day(&mut state, 336, &[rollover]);
        assert_eq!(state.character.age, 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CharacterAged { new_age: 1, .. })));
    }

    #[test]
    fn rest_requires_home() {
        let mut state = GameState::new_run();
        state.location = "Parque".to_string();
        assert!(!rest(&mut state).is_applied());
        state.location = "Lar Familiar".to_string();
        state.character.energy = 50;
        assert!(rest(&mut state).is_applied());
        assert_eq!(state.character.energy, 70);
    }

    #[test]
    fn eat_charges_coins() {
        let mut state = GameState::new_run();
        assert!(!eat(&mut state).is_applied());
        state.resources.coins = 5;
        state.character.hunger = 50;
        assert!(eat(&mut state).is_applied());
        assert_eq!(state.resources.coins, 0);
        assert_eq!(state.character.hunger, 30);
    }
}
