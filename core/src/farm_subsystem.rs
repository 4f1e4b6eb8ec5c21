//! Farm subsystem: crop growth, animal upkeep, and the farming actions.
//!
//! Crop progress is recomputed from planted_day every morning, so a
//! run restored from an old save lands on exactly the same percentage.
//! Animals lose health when a full day passes without feeding.

use crate::{
    action::ActionOutcome,
    config::GameConfig,
    error::SimResult,
    event::GameEvent,
    rng::SubsystemRng,
    state::{Animal, Crop, GameState},
    subsystem::GameSubsystem,
    types::Day,
};

const STARVATION_HEALTH_LOSS: i64 = 10;
const FEED_COST: i64 = 5;
const FEED_HEALTH_GAIN: i64 = 20;

pub struct FarmSubsystem;

impl FarmSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FarmSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSubsystem for FarmSubsystem {
    fn name(&self) -> &'static str {
        "farm"
    }

    fn on_day(
        &mut self,
        state: &mut GameState,
        config: &GameConfig,
        day: Day,
        _events_in: &[GameEvent],
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<GameEvent>> {
        let mut events = Vec::new();

        for crop in &mut state.farm.crops {
            let Some(spec) = config.crops.get(&crop.kind) else {
                continue;
            };
            let elapsed = day.saturating_sub(crop.planted_day);
            let new_progress = ((elapsed * 100 / spec.growth_days.max(1)) as i64).min(100);
            if crop.progress < 100 && new_progress >= 100 {
                events.push(GameEvent::CropMatured {
                    day_count: day,
                    kind: crop.kind.clone(),
                });
            }
            crop.progress = new_progress;
        }

        for animal in &mut state.farm.animals {
            if day.saturating_sub(animal.last_fed_day) > 1 {
                animal.health = (animal.health - STARVATION_HEALTH_LOSS).max(0);
                events.push(GameEvent::AnimalStarving {
                    day_count: day,
                    kind: animal.kind.clone(),
                    health: animal.health,
                });
            }
        }

        Ok(events)
    }
}

/// Plant a crop. Needs the farm, a known crop kind, and seed money.
pub fn plant(state: &mut GameState, config: &GameConfig, kind: &str) -> ActionOutcome {
    if state.location != "Fazenda" {
        return ActionOutcome::rejected("Planting happens at the farm.");
    }
    let Some(spec) = config.crop(kind) else {
        return ActionOutcome::rejected(format!("Nobody here grows {kind}."));
    };
    if !state.resources.try_spend(spec.seed_cost) {
        return ActionOutcome::rejected(format!("{kind} seeds cost {} coins.", spec.seed_cost));
    }
    let day = state.calendar.day_count;
    state.farm.crops.push(Crop {
        kind: kind.to_string(),
        planted_day: day,
        progress: 0,
    });
    ActionOutcome::applied(
        vec![GameEvent::CropPlanted {
            day_count: day,
            kind: kind.to_string(),
        }],
        vec![format!("You plant {kind}.")],
    )
}

/// Harvest one mature crop of the given kind.
pub fn harvest(state: &mut GameState, config: &GameConfig, kind: &str) -> ActionOutcome {
    if state.location != "Fazenda" {
        return ActionOutcome::rejected("Harvesting happens at the farm.");
    }
    let Some(spec) = config.crop(kind) else {
        return ActionOutcome::rejected(format!("Nobody here grows {kind}."));
    };
    let Some(index) = state
        .farm
        .crops
        .iter()
        .position(|c| c.kind == kind && c.progress >= 100)
    else {
        return ActionOutcome::rejected(format!("No {kind} is ready to harvest."));
    };
    state.farm.crops.remove(index);

    let yield_coins = spec.base_yield + state.trade.farming_skill / 5;
    state.resources.earn(yield_coins);
    let day = state.calendar.day_count;
    ActionOutcome::applied(
        vec![GameEvent::CropHarvested {
            day_count: day,
            kind: kind.to_string(),
            yield_coins,
        }],
        vec![format!("You harvest {kind} and earn {yield_coins} coins.")],
    )
}

/// Buy an animal for the farm.
pub fn buy_animal(state: &mut GameState, config: &GameConfig, kind: &str) -> ActionOutcome {
    if state.location != "Fazenda" {
        return ActionOutcome::rejected("Animals are bought at the farm.");
    }
    let Some(spec) = config.animal(kind) else {
        return ActionOutcome::rejected(format!("Nobody here sells a {kind}."));
    };
    if !state.resources.try_spend(spec.cost) {
        return ActionOutcome::rejected(format!("A {kind} costs {} coins.", spec.cost));
    }
    let day = state.calendar.day_count;
    state.farm.animals.push(Animal {
        kind: kind.to_string(),
        health: 100,
        last_fed_day: day,
    });
    ActionOutcome::applied(
        Vec::new(),
        vec![format!("A {kind} joins the farm.")],
    )
}

/// Feed the hungriest animal of the given kind.
pub fn feed_animal(state: &mut GameState, kind: &str) -> ActionOutcome {
    if state.location != "Fazenda" {
        return ActionOutcome::rejected("Feeding happens at the farm.");
    }
    let Some(index) = state
        .farm
        .animals
        .iter()
        .enumerate()
        .filter(|(_, a)| a.kind == kind)
        .min_by_key(|(_, a)| a.health)
        .map(|(i, _)| i)
    else {
        return ActionOutcome::rejected(format!("You have no {kind} to feed."));
    };
    if !state.resources.try_spend(FEED_COST) {
        return ActionOutcome::rejected(format!("Feed costs {FEED_COST} coins."));
    }
    let day = state.calendar.day_count;
    let animal = &mut state.farm.animals[index];
    animal.health = (animal.health + FEED_HEALTH_GAIN).min(100);
    animal.last_fed_day = day;
    ActionOutcome::applied(
        Vec::new(),
        vec![format!("You feed the {kind}.")],
    )
}
