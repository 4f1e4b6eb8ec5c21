//! Mission subsystem: daily offers from contacts plus seasonal harvest
//! work, and the accept/progress actions.
//!
//! A mission id is stable across a run, so the completion cooldown can
//! key on it. Offers never duplicate an id that is already offered,
//! active, or completed within the cooldown window.

use crate::{
    action::ActionOutcome,
    config::GameConfig,
    error::SimResult,
    event::GameEvent,
    rng::SubsystemRng,
    state::{CompletedMission, GameState, Mission},
    subsystem::GameSubsystem,
    types::Day,
};

const OFFER_CHANCE: f64 = 0.2;
const OFFER_MIN_RELATIONSHIP: i64 = 50;
const COMPLETION_COOLDOWN_DAYS: u64 = 7;
const DELIVERY_GOAL: i64 = 10;
const DELIVERY_BASE_REWARD: i64 = 50;
const SEASONAL_GOAL: i64 = 5;
const SEASONAL_REWARD: i64 = 100;
const PROGRESS_ENERGY_COST: i64 = 15;

pub struct MissionSubsystem;

impl MissionSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MissionSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSubsystem for MissionSubsystem {
    fn name(&self) -> &'static str {
        "mission"
    }

    fn on_day(
        &mut self,
        state: &mut GameState,
        config: &GameConfig,
        day: Day,
        _events_in: &[GameEvent],
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<GameEvent>> {
        let mut events = Vec::new();

        // Delivery offers from contacts the player knows well.
        for npc in &config.npcs {
            let relationship = state
                .relationships
                .contacts
                .iter()
                .find(|c| c.name == npc.name)
                .map(|c| c.relationship)
                .unwrap_or(0);
            if relationship < OFFER_MIN_RELATIONSHIP {
                continue;
            }

            let id = format!("entrega-{}", npc.name.to_lowercase());
            if !offerable(state, &id, day) {
                continue;
            }
            // Roll the dice for every eligible contact, every day, so
            // the stream consumption does not depend on prior offers.
            if !rng.chance(OFFER_CHANCE) {
                continue;
            }

            let mission = Mission {
                id: id.clone(),
                title: format!("Entrega para {}", npc.name),
                giver: npc.name.clone(),
                location: npc.location.clone(),
                goal: DELIVERY_GOAL,
                progress: 0,
                reward_coins: DELIVERY_BASE_REWARD + state.trade.trading_skill * 2,
                offered_day: day,
            };
            events.push(GameEvent::MissionOffered {
                day_count: day,
                mission_id: mission.id.clone(),
                title: mission.title.clone(),
            });
            state.missions.offered.push(mission);
        }

        // The standing seasonal harvest job.
        let season = state.calendar.season;
        let seasonal_id = format!("colheita-{season}").to_lowercase();
        if offerable(state, &seasonal_id, day) {
            let mission = Mission {
                id: seasonal_id.clone(),
                title: format!("Colheita de {season}"),
                giver: "Fazendeiro".to_string(),
                location: "Fazenda".to_string(),
                goal: SEASONAL_GOAL,
                progress: 0,
                reward_coins: SEASONAL_REWARD,
                offered_day: day,
            };
            events.push(GameEvent::MissionOffered {
                day_count: day,
                mission_id: mission.id.clone(),
                title: mission.title.clone(),
            });
            state.missions.offered.push(mission);
        }

        Ok(events)
    }
}

fn offerable(state: &GameState, id: &str, day: Day) -> bool {
    if state.missions.is_known(id) {
        return false;
    }
    match state.missions.days_since_completed(id, day) {
        Some(elapsed) => elapsed >= COMPLETION_COOLDOWN_DAYS,
        None => true,
    }
}

/// Accept an offered mission, moving it to the active list.
pub fn accept(state: &mut GameState, id: &str) -> ActionOutcome {
    let Some(index) = state.missions.offered.iter().position(|m| m.id == id) else {
        return ActionOutcome::rejected("That mission is not on offer.");
    };
    let mission = state.missions.offered.remove(index);
    let title = mission.title.clone();
    let day = state.calendar.day_count;
    state.missions.active.push(mission);
    ActionOutcome::applied(
        vec![GameEvent::MissionAccepted {
            day_count: day,
            mission_id: id.to_string(),
        }],
        vec![format!("Mission accepted: {title}")],
    )
}

/// Put a unit of work into an active mission. Completing it pays out.
pub fn progress(state: &mut GameState, id: &str) -> ActionOutcome {
    let Some(index) = state.missions.active.iter().position(|m| m.id == id) else {
        return ActionOutcome::rejected("That mission is not active.");
    };
    if state.location != state.missions.active[index].location {
        let place = state.missions.active[index].location.clone();
        return ActionOutcome::rejected(format!("This work happens at {place}."));
    }
    if !state.character.try_spend_energy(PROGRESS_ENERGY_COST) {
        return ActionOutcome::rejected("You are too tired for mission work.");
    }

    let day = state.calendar.day_count;
    let mission = &mut state.missions.active[index];
    mission.progress += 1;
    if mission.progress < mission.goal {
        let (done, goal) = (mission.progress, mission.goal);
        return ActionOutcome::applied(
            Vec::new(),
            vec![format!("Mission progress: {done}/{goal}.")],
        );
    }

    let mission = state.missions.active.remove(index);
    state.resources.earn(mission.reward_coins);
    if mission.id.starts_with("colheita-") {
        state.trade.farming_skill += 5;
    }
    state.missions.completed.push(CompletedMission {
        id: mission.id.clone(),
        completed_day: day,
    });
    ActionOutcome::applied(
        vec![GameEvent::MissionCompleted {
            day_count: day,
            mission_id: mission.id,
            reward_coins: mission.reward_coins,
        }],
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, SubsystemSlot};
    use crate::state::Contact;

    fn run_day(state: &mut GameState, day: Day, seed: u64) -> Vec<GameEvent> {
        let config = GameConfig::default_test();
        let mut rng = RngBank::new(seed).stream(SubsystemSlot::Mission, day);
        MissionSubsystem::new()
            .on_day(state, &config, day, &[], &mut rng)
            .unwrap()
    }

    fn befriend(state: &mut GameState, name: &str, location: &str) {
        state.relationships.contacts.push(Contact {
            name: name.to_string(),
            role: String::new(),
            location: location.to_string(),
            relationship: 80,
        });
    }

    #[test]
    fn seasonal_mission_is_always_offered_fresh() {
        let mut state = GameState::new_run();
        let events = run_day(&mut state, 1, 1);
        assert!(state
            .missions
            .offered
            .iter()
            .any(|m| m.id.starts_with("colheita-")));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::MissionOffered { .. })));
    }

    #[test]
    fn delivery_offers_need_friendship() {
        let mut state = GameState::new_run();
        for day in 1..=50 {
            run_day(&mut state, day, 7);
            // accept-and-forget the seasonal offer so only deliveries remain visible
            state.missions.offered.retain(|m| m.id.starts_with("entrega-"));
            assert!(state.missions.offered.is_empty());
        }

        befriend(&mut state, "Comerciante", "Shopping");
        let mut offered = false;
        for day in 51..=150 {
            run_day(&mut state, day, 7);
            if state
                .missions
                .offered
                .iter()
                .any(|m| m.id == "entrega-comerciante")
            {
                offered = true;
                break;
            }
        }
        assert!(offered, "a well-known contact should eventually offer work");
    }

    #[test]
    fn no_duplicate_offers() {
        let mut state = GameState::new_run();
        run_day(&mut state, 1, 1);
        run_day(&mut state, 2, 1);
        let seasonal: Vec<_> = state
            .missions
            .offered
            .iter()
            .filter(|m| m.id.starts_with("colheita-"))
            .collect();
        assert_eq!(seasonal.len(), 1);
    }

    #[test]
    fn accept_moves_offered_to_active() {
        let mut state = GameState::new_run();
        run_day(&mut state, 1, 1);
        let id = state.missions.offered[0].id.clone();
        assert!(accept(&mut state, &id).is_applied());
        assert!(state.missions.offered.is_empty());
        assert_eq!(state.missions.active.len(), 1);
        assert!(!accept(&mut state, &id).is_applied());
    }

    #[test]
    fn progress_needs_location_and_energy() {
        let mut state = GameState::new_run();
        state.missions.active.push(Mission {
            id: "colheita-spring".to_string(),
            title: "Colheita".to_string(),
            giver: "Fazendeiro".to_string(),
            location: "Fazenda".to_string(),
            goal: 2,
            progress: 0,
            reward_coins: 100,
            offered_day: 1,
        });

        assert!(!progress(&mut state, "colheita-spring").is_applied());

        state.location = "Fazenda".to_string();
        state.character.energy = 10;
        assert!(!progress(&mut state, "colheita-spring").is_applied());

        state.character.energy = 100;
        assert!(progress(&mut state, "colheita-spring").is_applied());
        assert_eq!(state.character.energy, 85);
        assert_eq!(state.missions.active[0].progress, 1);
    }

    #[test]
    fn completion_pays_once_and_trains_farming() {
        let mut state = GameState::new_run();
        state.location = "Fazenda".to_string();
        state.calendar.day_count = 10;
        state.missions.active.push(Mission {
            id: "colheita-spring".to_string(),
            title: "Colheita".to_string(),
            giver: "Fazendeiro".to_string(),
            location: "Fazenda".to_string(),
            goal: 1,
            progress: 0,
            reward_coins: 100,
            offered_day: 1,
        });

        let outcome = progress(&mut state, "colheita-spring");
        assert!(outcome.is_applied());
        assert_eq!(state.resources.coins, 100);
        assert_eq!(state.trade.farming_skill, 5);
        assert!(state.missions.active.is_empty());
        assert_eq!(state.missions.completed.len(), 1);
        assert_eq!(state.missions.completed[0].completed_day, 10);

        // further work on the finished mission is rejected
        assert!(!progress(&mut state, "colheita-spring").is_applied());
    }

    #[test]
    fn completed_mission_respects_cooldown() {
        let mut state = GameState::new_run();
        state.missions.completed.push(CompletedMission {
            id: "colheita-winter".to_string(),
            completed_day: 10,
        });
        // winter is the starting season, cooldown still running
        run_day(&mut state, 12, 1);
        assert!(!state
            .missions
            .offered
            .iter()
            .any(|m| m.id == "colheita-winter"));
        run_day(&mut state, 17, 1);
        assert!(state
            .missions
            .offered
            .iter()
            .any(|m| m.id == "colheita-winter"));
    }
}
