//! Player action dispatch.
//!
//! RULE: Every player-initiated mutation goes through apply().
//! A handler checks ALL of its preconditions before touching state;
//! a rejected action leaves the document exactly as it found it.
//! Handlers never roll dice — player actions are fully deterministic.

use crate::{
    config::GameConfig,
    education, event_subsystem, farm_subsystem, home_subsystem, inventory, mission_subsystem,
    relationships, trade_subsystem,
    event::GameEvent,
    state::GameState,
};
use serde::{Deserialize, Serialize};

/// Every action a player can take.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerAction {
    Travel { destination: String },
    Rest,
    Eat,
    Plant { kind: String },
    Harvest { kind: String },
    BuyAnimal { kind: String },
    FeedAnimal { kind: String },
    Buy { item: String },
    Sell { item: String },
    AcceptMission { id: String },
    ProgressMission { id: String },
    ResolveEvent { id: String },
    Interact { target: String },
    Enroll { course: String },
    Study { course: String },
    CleanHome,
    ImproveComfort,
    UpgradeRoom { room: String },
    StoreItem { item: String, quantity: i64 },
    DropItem { item: String },
    UseItem { item: String },
    SetSetting {
        high_contrast: Option<bool>,
        font_size: Option<String>,
        screen_reader_support: Option<bool>,
        debug_mode: Option<bool>,
    },
    AdvanceDays { days: u64 },
}

impl PlayerAction {
    /// Stable string name, recorded on the player_action_applied event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Travel { .. } => "travel",
            Self::Rest => "rest",
            Self::Eat => "eat",
            Self::Plant { .. } => "plant",
            Self::Harvest { .. } => "harvest",
            Self::BuyAnimal { .. } => "buy_animal",
            Self::FeedAnimal { .. } => "feed_animal",
            Self::Buy { .. } => "buy",
            Self::Sell { .. } => "sell",
            Self::AcceptMission { .. } => "accept_mission",
            Self::ProgressMission { .. } => "progress_mission",
            Self::ResolveEvent { .. } => "resolve_event",
            Self::Interact { .. } => "interact",
            Self::Enroll { .. } => "enroll",
            Self::Study { .. } => "study",
            Self::CleanHome => "clean_home",
            Self::ImproveComfort => "improve_comfort",
            Self::UpgradeRoom { .. } => "upgrade_room",
            Self::StoreItem { .. } => "store_item",
            Self::DropItem { .. } => "drop_item",
            Self::UseItem { .. } => "use_item",
            Self::SetSetting { .. } => "set_setting",
            Self::AdvanceDays { .. } => "advance_days",
        }
    }
}

/// The result of dispatching a player action.
/// Rejection is a normal outcome, not an error.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Applied {
        events: Vec<GameEvent>,
        notices: Vec<String>,
    },
    Rejected {
        notice: String,
    },
}

impl ActionOutcome {
    pub fn applied(events: Vec<GameEvent>, notices: Vec<String>) -> Self {
        Self::Applied { events, notices }
    }

    pub fn rejected(notice: impl Into<String>) -> Self {
        Self::Rejected {
            notice: notice.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// The single dispatch table. AdvanceDays is handled by the engine.
pub fn apply(state: &mut GameState, config: &GameConfig, action: &PlayerAction) -> ActionOutcome {
    match action {
        PlayerAction::Travel { destination } => travel(state, config, destination),
        PlayerAction::Rest => crate::character_subsystem::rest(state),
        PlayerAction::Eat => crate::character_subsystem::eat(state),
        PlayerAction::Plant { kind } => farm_subsystem::plant(state, config, kind),
        PlayerAction::Harvest { kind } => farm_subsystem::harvest(state, config, kind),
        PlayerAction::BuyAnimal { kind } => farm_subsystem::buy_animal(state, config, kind),
        PlayerAction::FeedAnimal { kind } => farm_subsystem::feed_animal(state, kind),
        PlayerAction::Buy { item } => trade_subsystem::buy(state, item),
        PlayerAction::Sell { item } => trade_subsystem::sell(state, item),
        PlayerAction::AcceptMission { id } => mission_subsystem::accept(state, id),
        PlayerAction::ProgressMission { id } => mission_subsystem::progress(state, id),
        PlayerAction::ResolveEvent { id } => event_subsystem::resolve(state, id),
        PlayerAction::Interact { target } => relationships::interact(state, config, target),
        PlayerAction::Enroll { course } => education::enroll(state, config, course),
        PlayerAction::Study { course } => education::study(state, config, course),
        PlayerAction::CleanHome => home_subsystem::clean(state),
        PlayerAction::ImproveComfort => home_subsystem::improve_comfort(state),
        PlayerAction::UpgradeRoom { room } => home_subsystem::upgrade_room(state, room),
        PlayerAction::StoreItem { item, quantity } => inventory::store_item(state, item, *quantity),
        PlayerAction::DropItem { item } => inventory::drop_item(state, item),
        PlayerAction::UseItem { item } => inventory::use_item(state, config, item),
        PlayerAction::SetSetting {
            high_contrast,
            font_size,
            screen_reader_support,
            debug_mode,
        } => set_setting(
            state,
            *high_contrast,
            font_size.clone(),
            *screen_reader_support,
            *debug_mode,
        ),
        PlayerAction::AdvanceDays { .. } => {
            ActionOutcome::rejected("Time skipping is handled by the engine.")
        }
    }
}

/// Move to another location. Costs a little energy and counts the visit.
fn travel(state: &mut GameState, config: &GameConfig, destination: &str) -> ActionOutcome {
    if !config.location_exists(destination) {
        return ActionOutcome::rejected(format!("Unknown place: {destination}."));
    }
    if state.location == destination {
        return ActionOutcome::rejected(format!("You are already at {destination}."));
    }
    state.location = destination.to_string();
    state.character.energy = (state.character.energy - 5).max(0);
    *state.visited.entry(destination.to_string()).or_insert(0) += 1;
    ActionOutcome::applied(
        vec![GameEvent::TraveledTo {
            day_count: state.calendar.day_count,
            location: destination.to_string(),
        }],
        vec![format!("You arrive at {destination}.")],
    )
}

fn set_setting(
    state: &mut GameState,
    high_contrast: Option<bool>,
    font_size: Option<String>,
    screen_reader_support: Option<bool>,
    debug_mode: Option<bool>,
) -> ActionOutcome {
    if let Some(v) = high_contrast {
        state.settings.high_contrast = v;
    }
    if let Some(v) = font_size {
        state.settings.font_size = v;
    }
    if let Some(v) = screen_reader_support {
        state.settings.screen_reader_support = v;
    }
    if let Some(v) = debug_mode {
        state.settings.debug_mode = v;
    }
    ActionOutcome::applied(Vec::new(), vec!["Settings updated.".to_string()])
}
