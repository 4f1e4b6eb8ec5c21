//! Subsystem trait and registry.
//!
//! RULE: Every daily subsystem implements GameSubsystem.
//! The engine calls on_day() on each registered subsystem
//! in registration order, once per in-game day.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    config::GameConfig, error::SimResult, event::GameEvent, rng::SubsystemRng, state::GameState,
    types::Day,
};

/// The contract every daily subsystem must fulfill.
pub trait GameSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per in-game day by the engine.
    ///
    /// - `state`:     the game state document, mutated in place
    /// - `day`:       the day counter after today's calendar advance
    /// - `events_in`: events emitted earlier today (calendar first,
    ///                then earlier subsystems in registration order)
    /// - `rng`:       this subsystem's deterministic RNG for this day
    ///
    /// Returns new events to append to the day's event log.
    fn on_day(
        &mut self,
        state: &mut GameState,
        config: &GameConfig,
        day: Day,
        events_in: &[GameEvent],
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<GameEvent>>;
}
