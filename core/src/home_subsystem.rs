//! Home subsystem: the household decays a little every day, and the
//! player can clean, furnish, and upgrade rooms to push back.
//!
//! A dirty home weighs on mood. Room upgrades get more expensive with
//! each level; there is no level cap.

use crate::{
    action::ActionOutcome,
    config::GameConfig,
    error::SimResult,
    event::GameEvent,
    rng::SubsystemRng,
    state::{clamp_stat, GameState},
    subsystem::GameSubsystem,
    types::Day,
};

const CLEANLINESS_DECAY_PER_DAY: i64 = 2;
const DIRTY_THRESHOLD: i64 = 30;
const DIRTY_MOOD_DRAIN: i64 = 2;
const CLEAN_ENERGY_COST: i64 = 10;
const CLEAN_GAIN: i64 = 20;
const COMFORT_COIN_COST: i64 = 20;
const COMFORT_ENERGY_COST: i64 = 10;
const COMFORT_GAIN: i64 = 15;
const UPGRADE_COST_PER_LEVEL: i64 = 50;
const UPGRADE_COMFORT_GAIN: i64 = 10;
const UPGRADE_CLEANLINESS_GAIN: i64 = 5;

pub struct HomeSubsystem;

impl HomeSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HomeSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSubsystem for HomeSubsystem {
    fn name(&self) -> &'static str {
        "home"
    }

    fn on_day(
        &mut self,
        state: &mut GameState,
        _config: &GameConfig,
        day: Day,
        _events_in: &[GameEvent],
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<GameEvent>> {
        let mut events = Vec::new();

        state.home.cleanliness = (state.home.cleanliness - CLEANLINESS_DECAY_PER_DAY).max(0);
        if state.home.cleanliness < DIRTY_THRESHOLD {
            state.character.add_mood(-DIRTY_MOOD_DRAIN);
            events.push(GameEvent::HomeNeglected {
                day_count: day,
                cleanliness: state.home.cleanliness,
            });
        }

        Ok(events)
    }
}

/// Clean the house. Costs energy, restores cleanliness.
pub fn clean(state: &mut GameState) -> ActionOutcome {
    if state.location != "Lar Familiar" {
        return ActionOutcome::rejected("Cleaning happens at home.");
    }
    if !state.character.try_spend_energy(CLEAN_ENERGY_COST) {
        return ActionOutcome::rejected("You are too tired to clean.");
    }
    state.home.cleanliness = clamp_stat(state.home.cleanliness + CLEAN_GAIN);
    ActionOutcome::applied(
        Vec::new(),
        vec!["You tidy the house up.".to_string()],
    )
}

/// Spend a little money and effort making the place nicer.
pub fn improve_comfort(state: &mut GameState) -> ActionOutcome {
    if state.location != "Lar Familiar" {
        return ActionOutcome::rejected("Home improvements happen at home.");
    }
    if state.character.energy < COMFORT_ENERGY_COST {
        return ActionOutcome::rejected("You are too tired for home improvements.");
    }
    if !state.resources.try_spend(COMFORT_COIN_COST) {
        return ActionOutcome::rejected(format!(
            "Improvements cost {COMFORT_COIN_COST} coins."
        ));
    }
    state.character.add_energy(-COMFORT_ENERGY_COST);
    state.home.comfort = clamp_stat(state.home.comfort + COMFORT_GAIN);
    ActionOutcome::applied(
        Vec::new(),
        vec!["The house feels a bit cozier.".to_string()],
    )
}

/// Upgrade a room to its next level. Each level costs more than the
/// last and permanently lifts the home stats.
pub fn upgrade_room(state: &mut GameState, room: &str) -> ActionOutcome {
    if state.location != "Lar Familiar" {
        return ActionOutcome::rejected("Upgrades happen at home.");
    }
    let Some(&level) = state.home.upgrades.get(room) else {
        return ActionOutcome::rejected(format!("The house has no {room}."));
    };
    let cost = i64::from(level) * UPGRADE_COST_PER_LEVEL;
    if !state.resources.try_spend(cost) {
        return ActionOutcome::rejected(format!("Upgrading the {room} costs {cost} coins."));
    }

    let new_level = level + 1;
    state.home.upgrades.insert(room.to_string(), new_level);
    state.home.comfort = clamp_stat(state.home.comfort + UPGRADE_COMFORT_GAIN);
    state.home.cleanliness = clamp_stat(state.home.cleanliness + UPGRADE_CLEANLINESS_GAIN);
    let day = state.calendar.day_count;
    ActionOutcome::applied(
        vec![GameEvent::RoomUpgraded {
            day_count: day,
            room: room.to_string(),
            level: new_level,
        }],
        vec![format!("The {room} is now level {new_level}.")],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, SubsystemSlot};

    fn run_day(state: &mut GameState, day: Day) -> Vec<GameEvent> {
        let config = GameConfig::default_test();
        let mut rng = RngBank::new(1).stream(SubsystemSlot::Home, day);
        HomeSubsystem::new()
            .on_day(state, &config, day, &[], &mut rng)
            .unwrap()
    }

    fn at_home(coins: i64) -> GameState {
        let mut state = GameState::new_run();
        state.resources.coins = coins;
        state
    }

    #[test]
    fn cleanliness_decays_daily() {
        let mut state = GameState::new_run();
        run_day(&mut state, 1);
        assert_eq!(state.home.cleanliness, 48);
    }

    #[test]
    fn dirty_home_drains_mood() {
        let mut state = GameState::new_run();
        state.home.cleanliness = 20;
        let mood_before = state.character.mood;
        let events = run_day(&mut state, 1);
        assert_eq!(state.character.mood, mood_before - 2);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::HomeNeglected { .. })));
    }

    #[test]
    fn clean_restores_cleanliness() {
        let mut state = at_home(0);
        state.home.cleanliness = 40;
        assert!(clean(&mut state).is_applied());
        assert_eq!(state.home.cleanliness, 60);
        assert_eq!(state.character.energy, 90);
    }

    #[test]
    fn clean_requires_home_and_energy() {
        let mut state = at_home(0);
        state.location = "Parque".to_string();
        assert!(!clean(&mut state).is_applied());

        state.location = "Lar Familiar".to_string();
        state.character.energy = 5;
        assert!(!clean(&mut state).is_applied());
        assert_eq!(state.character.energy, 5);
    }

    #[test]
    fn improve_comfort_charges_coins_and_energy() {
        let mut state = at_home(20);
        assert!(improve_comfort(&mut state).is_applied());
        assert_eq!(state.home.comfort, 65);
        assert_eq!(state.resources.coins, 0);
        assert_eq!(state.character.energy, 90);

        // broke: nothing changes
        assert!(!improve_comfort(&mut state).is_applied());
        assert_eq!(state.character.energy, 90);
    }

    #[test]
    fn upgrade_cost_scales_with_level() {
        let mut state = at_home(50);
        assert!(upgrade_room(&mut state, "kitchen").is_applied());
        assert_eq!(state.home.upgrades.get("kitchen"), Some(&2));
        assert_eq!(state.resources.coins, 0);
        assert_eq!(state.home.comfort, 60);
        assert_eq!(state.home.cleanliness, 55);

        // level 2 -> 3 costs 100 now
        state.resources.coins = 99;
        assert!(!upgrade_room(&mut state, "kitchen").is_applied());
        state.resources.coins = 100;
        assert!(upgrade_room(&mut state, "kitchen").is_applied());
        assert_eq!(state.home.upgrades.get("kitchen"), Some(&3));
    }

    #[test]
    fn unknown_room_is_rejected() {
        let mut state = at_home(500);
        assert!(!upgrade_room(&mut state, "piscina").is_applied());
        assert_eq!(state.resources.coins, 500);
    }
}
