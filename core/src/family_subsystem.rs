//! Family subsystem: household members age alongside the character.
//!
//! Members age on the year rollover and eventually pass away. Deceased
//! members stay in the record with their status changed; the history of
//! the household is never erased.

use crate::{
    config::GameConfig,
    error::SimResult,
    event::GameEvent,
    rng::SubsystemRng,
    state::{GameState, LifeStatus},
    subsystem::GameSubsystem,
    types::Day,
};

const LIFESPAN_YEARS: u32 = 100;

pub struct FamilySubsystem;

impl FamilySubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FamilySubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSubsystem for FamilySubsystem {
    fn name(&self) -> &'static str {
        "family"
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

        if !events_in
            .iter()
            .any(|e| matches!(e, GameEvent::YearRolledOver { .. }))
        {
            return Ok(events);
        }

        for member in &mut state.family.members {
            if member.status != LifeStatus::Alive {
                continue;
            }
            member.age += 1;
            if member.age >= LIFESPAN_YEARS {
                member.status = LifeStatus::Deceased;
                events.push(GameEvent::FamilyMemberDied {
                    day_count: day,
                    name: member.name.clone(),
                    age: member.age,
                });
            }
        }

        Ok(events)
    }
}
