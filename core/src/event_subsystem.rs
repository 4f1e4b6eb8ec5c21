//! Event subsystem: the seasonal festival standing offer plus social
//! invitations from close contacts, and the attend action.
//!
//! An event id is stable for the run, so the cooldown after attending
//! keys on it. Festivals rotate with the season; invitations come from
//! contacts the player is close to.

use crate::{
    action::ActionOutcome,
    config::GameConfig,
    error::SimResult,
    event::GameEvent,
    rng::SubsystemRng,
    state::{GameState, ResolvedEvent, WorldEvent, WorldEventKind},
    subsystem::GameSubsystem,
    types::Day,
};

const INVITE_CHANCE: f64 = 0.1;
const INVITE_MIN_RELATIONSHIP: i64 = 80;
const RESOLVED_COOLDOWN_DAYS: u64 = 7;
const ATTEND_ENERGY_COST: i64 = 20;
const ATTEND_MOOD_GAIN: i64 = 15;
const SEASONAL_COIN_REWARD: i64 = 50;
const SOCIAL_RELATIONSHIP_GAIN: i64 = 10;

pub struct EventSubsystem;

impl EventSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EventSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSubsystem for EventSubsystem {
    fn name(&self) -> &'static str {
        "event"
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

        // The season's festival is always on offer once the cooldown clears.
        let seasonal = GameConfig::seasonal_event(state.calendar.season);
        if offerable(state, seasonal.id, day) {
            let world_event = WorldEvent {
                id: seasonal.id.to_string(),
                name: seasonal.name.to_string(),
                kind: WorldEventKind::Seasonal,
                location: seasonal.location.to_string(),
                host: None,
                offered_day: day,
            };
            events.push(GameEvent::EventOffered {
                day_count: day,
                event_id: world_event.id.clone(),
                name: world_event.name.clone(),
                location: world_event.location.clone(),
            });
            state.events.active.push(world_event);
        }

        // Close contacts occasionally invite the player over.
        for npc in &config.npcs {
            let relationship = state
                .relationships
                .contacts
                .iter()
                .find(|c| c.name == npc.name)
                .map(|c| c.relationship)
                .unwrap_or(0);
            if relationship < INVITE_MIN_RELATIONSHIP {
                continue;
            }

            let id = format!("convite-{}", npc.name.to_lowercase());
            if !offerable(state, &id, day) {
                continue;
            }
            // One roll per eligible contact per day keeps the stream
            // consumption independent of what is currently on offer.
            if !rng.chance(INVITE_CHANCE) {
                continue;
            }

            let world_event = WorldEvent {
                id: id.clone(),
                name: format!("Convite de {}", npc.name),
                kind: WorldEventKind::Social,
                location: npc.location.clone(),
                host: Some(npc.name.clone()),
                offered_day: day,
            };
            events.push(GameEvent::EventOffered {
                day_count: day,
                event_id: world_event.id.clone(),
                name: world_event.name.clone(),
                location: world_event.location.clone(),
            });
            state.events.active.push(world_event);
        }

        Ok(events)
    }
}

fn offerable(state: &GameState, id: &str, day: Day) -> bool {
    if state.events.is_active(id) {
        return false;
    }
    match state.events.days_since_resolved(id, day) {
        Some(elapsed) => elapsed >= RESOLVED_COOLDOWN_DAYS,
        None => true,
    }
}

/// Attend an active event. Costs energy, lifts mood, and pays out the
/// kind-specific reward.
pub fn resolve(state: &mut GameState, id: &str) -> ActionOutcome {
    let Some(index) = state.events.active.iter().position(|e| e.id == id) else {
        return ActionOutcome::rejected("No such event is happening.");
    };
    if state.location != state.events.active[index].location {
        let place = state.events.active[index].location.clone();
        return ActionOutcome::rejected(format!("That event takes place at {place}."));
    }
    if !state.character.try_spend_energy(ATTEND_ENERGY_COST) {
        return ActionOutcome::rejected("You are too tired to attend.");
    }

    let day = state.calendar.day_count;
    let world_event = state.events.active.remove(index);
    state.character.add_mood(ATTEND_MOOD_GAIN);

    let mut notices = vec![format!("You attend {}.", world_event.name)];
    match world_event.kind {
        WorldEventKind::Seasonal => {
            state.resources.earn(SEASONAL_COIN_REWARD);
            notices.push(format!("The festival pays {SEASONAL_COIN_REWARD} coins."));
        }
        WorldEventKind::Social => {
            if let Some(host) = &world_event.host {
                if let Some(contact) = state.relationships.contact_mut(host) {
                    contact.relationship =
                        (contact.relationship + SOCIAL_RELATIONSHIP_GAIN).min(100);
                }
                notices.push(format!("{host} is glad you came."));
            }
        }
    }

    state.events.history.push(ResolvedEvent {
        id: world_event.id.clone(),
        resolved_day: day,
    });
    ActionOutcome::applied(
        vec![GameEvent::EventResolved {
            day_count: day,
            event_id: world_event.id,
        }],
        notices,
    )
}
