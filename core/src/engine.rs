//! The simulation engine — the heart of the Vibenópolis life sim.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Calendar advance (engine internal, not a subsystem)
//!   2. Character subsystem
//!   3. Family subsystem
//!   4. Farm subsystem
//!   5. Trade subsystem
//!   6. Mission subsystem
//!   7. Event subsystem
//!   8. Home subsystem
//!
//! RULES:
//!   - Subsystems execute in registration order, every day.
//!   - No subsystem calls another subsystem's functions directly.
//!   - All randomness flows through the RngBank.
//!   - All state changes are recorded in the event log.
//!   - The state document is saved after every advanced day and every
//!     applied action. Rejected actions persist nothing.

use crate::{
    action::{self, ActionOutcome, PlayerAction},
    character_subsystem::CharacterSubsystem,
    config::GameConfig,
    error::SimResult,
    event::{EventLogEntry, GameEvent},
    event_subsystem::EventSubsystem,
    family_subsystem::FamilySubsystem,
    farm_subsystem::FarmSubsystem,
    home_subsystem::HomeSubsystem,
    mission_subsystem::MissionSubsystem,
    rng::{RngBank, SubsystemSlot},
    state::GameState,
    store::GameStore,
    subsystem::GameSubsystem,
    trade_subsystem::TradeSubsystem,
    types::{Day, RunId},
};

pub struct GameEngine {
    pub run_id: RunId,
    pub state: GameState,
    pub store: GameStore,
    seed: u64,
    config: GameConfig,
    rng_bank: RngBank,
    subsystems: Vec<(SubsystemSlot, Box<dyn GameSubsystem>)>,
}

impl GameEngine {
    /// Build a fully wired engine with all subsystems registered,
    /// loading the saved state document if the run already exists.
    pub fn build(
        run_id: RunId,
        seed: u64,
        config: GameConfig,
        store: GameStore,
    ) -> SimResult<Self> {
        let state = if store.run_exists(&run_id)? {
            store.load_state(&run_id)?
        } else {
            store.insert_run(&run_id, seed, env!("CARGO_PKG_VERSION"))?;
            let state = GameState::new_run();
            store.save_state(&run_id, 0, &state)?;
            let init = GameEvent::RunInitialized {
                run_id: run_id.clone(),
                seed,
            };
            let entry = EventLogEntry {
                id: None,
                run_id: run_id.clone(),
                day_count: 0,
                subsystem: "engine".to_string(),
                event_type: init.type_name().to_string(),
                payload: serde_json::to_string(&init)?,
            };
            store.append_event(&entry)?;
            state
        };

        let mut engine = Self {
            run_id,
            state,
            store,
            seed,
            config,
            rng_bank: RngBank::new(seed),
            subsystems: Vec::new(),
        };

        // EXECUTION ORDER — fixed, documented, never reordered.
        engine.register(SubsystemSlot::Character, Box::new(CharacterSubsystem::new()));
        engine.register(SubsystemSlot::Family, Box::new(FamilySubsystem::new()));
        engine.register(SubsystemSlot::Farm, Box::new(FarmSubsystem::new()));
        engine.register(SubsystemSlot::Trade, Box::new(TradeSubsystem::new()));
        engine.register(SubsystemSlot::Mission, Box::new(MissionSubsystem::new()));
        engine.register(SubsystemSlot::Event, Box::new(EventSubsystem::new()));
        engine.register(SubsystemSlot::Home, Box::new(HomeSubsystem::new()));
        Ok(engine)
    }

    /// Register a subsystem. Call in the documented execution order.
    pub fn register(&mut self, slot: SubsystemSlot, subsystem: Box<dyn GameSubsystem>) {
        self.subsystems.push((slot, subsystem));
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Advance one in-game day. This is the core simulation step.
    pub fn advance_day(&mut self) -> SimResult<Vec<GameEvent>> {
        let day: Day = self.state.calendar.day_count + 1;

        let mut calendar_rng = self.rng_bank.stream(SubsystemSlot::Calendar, day);
        let delta = self.state.calendar.advance(&mut calendar_rng);
        debug_assert_eq!(self.state.calendar.day_count, day);

        let mut day_events: Vec<GameEvent> = vec![GameEvent::DayStarted {
            day_count: day,
            day: self.state.calendar.day,
            week: self.state.calendar.week,
            month: self.state.calendar.month,
            year: self.state.calendar.year,
            weather: self.state.calendar.weather,
        }];
        if let Some(season) = delta.season_changed {
            day_events.push(GameEvent::SeasonChanged {
                day_count: day,
                season,
            });
        }
        if delta.year_rolled {
            day_events.push(GameEvent::YearRolledOver {
                day_count: day,
                year: self.state.calendar.year,
            });
        }
        for event in &day_events {
            self.persist_event("calendar", day, event)?;
            if let Some(text) = event.notice_text() {
                self.store.append_notice(&self.run_id, day, &text)?;
            }
        }

        // Execute each subsystem in registration order.
        // Each subsystem sees all events emitted so far today.
        for (slot, subsystem) in &mut self.subsystems {
            let mut rng = self.rng_bank.stream(*slot, day);
            let new_events =
                subsystem.on_day(&mut self.state, &self.config, day, &day_events, &mut rng)?;

            for event in &new_events {
                let entry = EventLogEntry {
                    id: None,
                    run_id: self.run_id.clone(),
                    day_count: day,
                    subsystem: subsystem.name().to_string(),
                    event_type: event.type_name().to_string(),
                    payload: serde_json::to_string(event)?,
                };
                self.store.append_event(&entry)?;
                if let Some(text) = event.notice_text() {
                    self.store.append_notice(&self.run_id, day, &text)?;
                }
            }

            day_events.extend(new_events);
        }

        day_events.push(GameEvent::DayCompleted { day_count: day });

        self.store.save_state(&self.run_id, day, &self.state)?;
        log::debug!("day {day} advanced, {} events", day_events.len());
        Ok(day_events)
    }

    /// Advance n days in a loop. Used for catch-up and fast-forward.
    pub fn advance_days(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.advance_day()?;
        }
        Ok(())
    }

    /// Apply a player action. Preconditions are checked before any
    /// mutation; a rejected action leaves state and database untouched.
    pub fn dispatch(&mut self, player_action: &PlayerAction) -> SimResult<ActionOutcome> {
        if let PlayerAction::AdvanceDays { days } = player_action {
            if !self.state.settings.debug_mode {
                return Ok(ActionOutcome::rejected(
                    "Time skipping requires debug mode.",
                ));
            }
            self.advance_days(*days)?;
            return Ok(ActionOutcome::applied(
                Vec::new(),
                vec![format!("Skipped {days} day(s).")],
            ));
        }

        let outcome = action::apply(&mut self.state, &self.config, player_action);

        if let ActionOutcome::Applied { events, notices } = &outcome {
            let day = self.state.calendar.day_count;
            for event in events {
                self.persist_event("action", day, event)?;
                if let Some(text) = event.notice_text() {
                    self.store.append_notice(&self.run_id, day, &text)?;
                }
            }
            let applied = GameEvent::PlayerActionApplied {
                day_count: day,
                action: player_action.name().to_string(),
            };
            self.persist_event("action", day, &applied)?;
            for text in notices {
                self.store.append_notice(&self.run_id, day, text)?;
            }
            self.store.save_state(&self.run_id, day, &self.state)?;
        }

        Ok(outcome)
    }

    /// Query events for a specific day from the store.
    /// Used by the determinism tests and replay tooling.
    pub fn store_events_for_day(&self, day: Day) -> SimResult<Vec<EventLogEntry>> {
        self.store.events_for_day(&self.run_id, day)
    }

    fn persist_event(&self, subsystem: &str, day: Day, event: &GameEvent) -> SimResult<()> {
        let entry = EventLogEntry {
            id: None,
            run_id: self.run_id.clone(),
            day_count: day,
            subsystem: subsystem.to_string(),
            event_type: event.type_name().to_string(),
            payload: serde_json::to_string(event)?,
        };
        self.store.append_event(&entry)
    }
}

/// Mint a fresh run identifier.
pub fn new_run_id() -> RunId {
    format!("run-{}", uuid::Uuid::new_v4())
}
