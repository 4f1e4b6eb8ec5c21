//! The event log vocabulary.
//!
//! RULE: Subsystems communicate ONLY through events.
//! A subsystem may never call another subsystem's functions directly.
//! Variants are added per domain — never removed or reordered.

use crate::calendar::{Season, Weather};
use crate::types::{Day, EntityId, RunId};
use serde::{Deserialize, Serialize};

/// Every event emitted during simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Engine / calendar events ───────────────────
    RunInitialized {
        run_id: RunId,
        seed: u64,
    },
    DayStarted {
        day_count: Day,
        day: u32,
        week: u32,
        month: u32,
        year: u32,
        weather: Weather,
    },
    SeasonChanged {
        day_count: Day,
        season: Season,
    },
    YearRolledOver {
        day_count: Day,
        year: u32,
    },
    DayCompleted {
        day_count: Day,
    },
    PlayerActionApplied {
        day_count: Day,
        action: String,
    },

    // ── Character events ───────────────────────────
    CharacterAged {
        day_count: Day,
        new_age: u32,
    },
    StatCritical {
        day_count: Day,
        stat: String,
        value: i64,
    },

    // ── Family events ──────────────────────────────
    FamilyMemberDied {
        day_count: Day,
        name: String,
        age: u32,
    },

    // ── Farm events ────────────────────────────────
    CropPlanted {
        day_count: Day,
        kind: String,
    },
    CropMatured {
        day_count: Day,
        kind: String,
    },
    CropHarvested {
        day_count: Day,
        kind: String,
        yield_coins: i64,
    },
    AnimalStarving {
        day_count: Day,
        kind: String,
        health: i64,
    },

    // ── Trade events ───────────────────────────────
    ItemBought {
        day_count: Day,
        item: String,
        cost: i64,
    },
    ItemSold {
        day_count: Day,
        item: String,
        revenue: i64,
    },
    MarketRefreshed {
        day_count: Day,
    },

    // ── Mission events ─────────────────────────────
    MissionOffered {
        day_count: Day,
        mission_id: EntityId,
        title: String,
    },
    MissionAccepted {
        day_count: Day,
        mission_id: EntityId,
    },
    MissionCompleted {
        day_count: Day,
        mission_id: EntityId,
        reward_coins: i64,
    },

    // ── World event events ─────────────────────────
    EventOffered {
        day_count: Day,
        event_id: EntityId,
        name: String,
        location: String,
    },
    EventResolved {
        day_count: Day,
        event_id: EntityId,
    },

    // ── Home events ────────────────────────────────
    HomeNeglected {
        day_count: Day,
        cleanliness: i64,
    },
    RoomUpgraded {
        day_count: Day,
        room: String,
        level: u32,
    },

    // ── Travel / education events ──────────────────
    TraveledTo {
        day_count: Day,
        location: String,
    },
    CourseCompleted {
        day_count: Day,
        course: String,
        level: u32,
    },
}

impl GameEvent {
    /// Stable string name, used for the event_type column in event_log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunInitialized { .. } => "run_initialized",
            Self::DayStarted { .. } => "day_started",
            Self::SeasonChanged { .. } => "season_changed",
            Self::YearRolledOver { .. } => "year_rolled_over",
            Self::DayCompleted { .. } => "day_completed",
            Self::PlayerActionApplied { .. } => "player_action_applied",
            Self::CharacterAged { .. } => "character_aged",
            Self::StatCritical { .. } => "stat_critical",
            Self::FamilyMemberDied { .. } => "family_member_died",
            Self::CropPlanted { .. } => "crop_planted",
            Self::CropMatured { .. } => "crop_matured",
            Self::CropHarvested { .. } => "crop_harvested",
            Self::AnimalStarving { .. } => "animal_starving",
            Self::ItemBought { .. } => "item_bought",
            Self::ItemSold { .. } => "item_sold",
            Self::MarketRefreshed { .. } => "market_refreshed",
            Self::MissionOffered { .. } => "mission_offered",
            Self::MissionAccepted { .. } => "mission_accepted",
            Self::MissionCompleted { .. } => "mission_completed",
            Self::EventOffered { .. } => "event_offered",
            Self::EventResolved { .. } => "event_resolved",
            Self::HomeNeglected { .. } => "home_neglected",
            Self::RoomUpgraded { .. } => "room_upgraded",
            Self::TraveledTo { .. } => "traveled_to",
            Self::CourseCompleted { .. } => "course_completed",
        }
    }

    /// Human-readable notice for the persisted notification feed.
    /// Returns None for bookkeeping events the player does not need to see.
    pub fn notice_text(&self) -> Option<String> {
        match self {
            Self::SeasonChanged { season, .. } => {
                Some(format!("A new season begins: {season}."))
            }
            Self::YearRolledOver { year, .. } => {
                Some(format!("Happy new year! Year {year} begins."))
            }
            Self::CharacterAged { new_age, .. } => {
                Some(format!("You are now {new_age} years old."))
            }
            Self::StatCritical { stat, value, .. } => {
                Some(format!("Warning: {stat} is at {value}. Take care of yourself!"))
            }
            Self::FamilyMemberDied { name, age, .. } => {
                Some(format!("{name} passed away at age {age}."))
            }
            Self::CropMatured { kind, .. } => {
                Some(format!("{kind} is ready to harvest!"))
            }
            Self::AnimalStarving { kind, health, .. } => {
                Some(format!("{kind} is hungry! Health at {health}%."))
            }
            Self::MarketRefreshed { .. } => {
                Some("The market has new prices and stock.".to_string())
            }
            Self::MissionOffered { title, .. } => {
                Some(format!("New mission available: {title}"))
            }
            Self::MissionCompleted { reward_coins, .. } => {
                Some(format!("Mission complete! Reward: {reward_coins} coins."))
            }
            Self::EventOffered { name, location, .. } => {
                Some(format!("New event: {name} at {location}!"))
            }
            Self::HomeNeglected { cleanliness, .. } => {
                Some(format!("The house needs cleaning ({cleanliness}%)."))
            }
            Self::CourseCompleted { course, level, .. } => {
                Some(format!("Course {course} finished! Now at level {level}."))
            }
            _ => None,
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub run_id: RunId,
    pub day_count: Day,
    pub subsystem: String,
    pub event_type: String,
    pub payload: String, // JSON-serialized GameEvent
}
