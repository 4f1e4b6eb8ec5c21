//! The single game state document.
//!
//! RULE: The whole game lives in this one serializable document. It is
//! loaded from the store at engine startup, mutated in memory by
//! subsystems and action handlers, and written back whole after every
//! applied action and every advanced day. No slice is persisted alone.
//!
//! Every field carries #[serde(default)] so documents written by older
//! versions still load; unknown slices simply take their defaults.

use crate::calendar::Calendar;
use crate::types::{Day, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bounded stats live in [0, 100]. All writes go through this.
pub fn clamp_stat(value: i64) -> i64 {
    value.clamp(0, 100)
}

// ── Character ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub age: u32,
    pub health: i64,
    pub mood: i64,
    pub hunger: i64,
    pub thirst: i64,
    pub energy: i64,
    pub strength: i64,
    pub stamina: i64,
    pub agility: i64,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: "Você".to_string(),
            age: 0,
            health: 100,
            mood: 50,
            hunger: 50,
            thirst: 50,
            energy: 100,
            strength: 10,
            stamina: 10,
            agility: 10,
        }
    }
}

impl Character {
    pub fn add_health(&mut self, delta: i64) {
        self.health = clamp_stat(self.health + delta);
    }
    pub fn add_mood(&mut self, delta: i64) {
        self.mood = clamp_stat(self.mood + delta);
    }
    pub fn add_hunger(&mut self, delta: i64) {
        self.hunger = clamp_stat(self.hunger + delta);
    }
    pub fn add_thirst(&mut self, delta: i64) {
        self.thirst = clamp_stat(self.thirst + delta);
    }
    pub fn add_energy(&mut self, delta: i64) {
        self.energy = clamp_stat(self.energy + delta);
    }

    /// Spend energy if there is enough; false means the action must reject.
    pub fn try_spend_energy(&mut self, cost: i64) -> bool {
        if self.energy < cost {
            return false;
        }
        self.energy -= cost;
        true
    }
}

// ── Resources ──────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resources {
    pub coins: i64,
    pub followers: i64,
}

impl Resources {
    /// Spend coins if affordable; false means the action must reject.
    pub fn try_spend(&mut self, cost: i64) -> bool {
        if self.coins < cost {
            return false;
        }
        self.coins -= cost;
        true
    }

    pub fn earn(&mut self, amount: i64) {
        self.coins += amount;
    }
}

// ── Family ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStatus {
    Alive,
    Deceased,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: String,
    pub role: String,
    pub age: u32,
    pub relationship: i64,
    pub status: LifeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyState {
    pub members: Vec<FamilyMember>,
}

impl Default for FamilyState {
    fn default() -> Self {
        Self {
            members: vec![
                FamilyMember {
                    name: "Mãe".to_string(),
                    role: "Cuidadora".to_string(),
                    age: 40,
                    relationship: 50,
                    status: LifeStatus::Alive,
                },
                FamilyMember {
                    name: "Pai".to_string(),
                    role: "Provedor".to_string(),
                    age: 42,
                    relationship: 50,
                    status: LifeStatus::Alive,
                },
                FamilyMember {
                    name: "Irmão".to_string(),
                    role: "Estudante".to_string(),
                    age: 15,
                    relationship: 30,
                    status: LifeStatus::Alive,
                },
            ],
        }
    }
}

impl FamilyState {
    pub fn member_mut(&mut self, name: &str) -> Option<&mut FamilyMember> {
        self.members.iter_mut().find(|m| m.name == name)
    }
}

// ── Farm ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub kind: String,
    pub planted_day: Day,
    /// Growth percentage in [0, 100]. Recomputed daily from planted_day.
    pub progress: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub kind: String,
    pub health: i64,
    pub last_fed_day: Day,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FarmState {
    pub crops: Vec<Crop>,
    pub animals: Vec<Animal>,
}

// ── Trade / inventory ──────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEntry {
    pub item: String,
    pub price: i64,
    pub stock: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeState {
    /// Item name -> quantity held. The single shared inventory.
    pub inventory: BTreeMap<String, i64>,
    pub max_slots: i64,
    pub market: Vec<MarketEntry>,
    /// Permanent discount/markup skill, grown by courses.
    pub trading_skill: i64,
    pub farming_skill: i64,
    pub social_skill: i64,
}

impl Default for TradeState {
    fn default() -> Self {
        Self {
            inventory: BTreeMap::new(),
            max_slots: 20,
            market: Vec::new(),
            trading_skill: 0,
            farming_skill: 0,
            social_skill: 0,
        }
    }
}

impl TradeState {
    pub fn slots_used(&self) -> i64 {
        self.inventory.values().sum()
    }

    pub fn add_item(&mut self, item: &str, quantity: i64) {
        *self.inventory.entry(item.to_string()).or_insert(0) += quantity;
    }

    /// Remove `quantity` of `item`, dropping the entry at zero.
    /// False if the player does not hold enough.
    pub fn remove_item(&mut self, item: &str, quantity: i64) -> bool {
        match self.inventory.get_mut(item) {
            Some(held) if *held >= quantity => {
                *held -= quantity;
                if *held == 0 {
                    self.inventory.remove(item);
                }
                true
            }
            _ => false,
        }
    }
}

// ── Missions ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: EntityId,
    pub title: String,
    pub giver: String,
    pub location: String,
    pub goal: i64,
    pub progress: i64,
    pub reward_coins: i64,
    pub offered_day: Day,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedMission {
    pub id: EntityId,
    pub completed_day: Day,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionState {
    pub offered: Vec<Mission>,
    pub active: Vec<Mission>,
    pub completed: Vec<CompletedMission>,
}

impl MissionState {
    pub fn is_known(&self, id: &str) -> bool {
        self.offered.iter().any(|m| m.id == id) || self.active.iter().any(|m| m.id == id)
    }

    /// Days since this mission id was last completed, if ever.
    pub fn days_since_completed(&self, id: &str, today: Day) -> Option<Day> {
        self.completed
            .iter()
            .filter(|c| c.id == id)
            .map(|c| today.saturating_sub(c.completed_day))
            .min()
    }
}

// ── World events ───────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldEventKind {
    Seasonal,
    Social,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldEvent {
    pub id: EntityId,
    pub name: String,
    pub kind: WorldEventKind,
    pub location: String,
    /// For social invitations, the inviting contact.
    pub host: Option<String>,
    pub offered_day: Day,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEvent {
    pub id: EntityId,
    pub resolved_day: Day,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventState {
    pub active: Vec<WorldEvent>,
    pub history: Vec<ResolvedEvent>,
}

impl EventState {
    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|e| e.id == id)
    }

    pub fn days_since_resolved(&self, id: &str, today: Day) -> Option<Day> {
        self.history
            .iter()
            .filter(|r| r.id == id)
            .map(|r| today.saturating_sub(r.resolved_day))
            .min()
    }
}

// ── Relationships (non-family contacts) ────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub role: String,
    pub location: String,
    pub relationship: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipState {
    pub contacts: Vec<Contact>,
}

impl RelationshipState {
    pub fn contact_mut(&mut self, name: &str) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.name == name)
    }
}

// ── Education ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub course: String,
    /// Completion percentage in [0, 100]; resets on level-up.
    pub progress: i64,
    pub level: u32,
    pub last_study_day: Option<Day>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationState {
    pub enrollments: Vec<Enrollment>,
}

impl EducationState {
    pub fn enrollment_mut(&mut self, course: &str) -> Option<&mut Enrollment> {
        self.enrollments.iter_mut().find(|e| e.course == course)
    }
}

// ── Home ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeState {
    pub cleanliness: i64,
    pub comfort: i64,
    /// Room name -> upgrade level.
    pub upgrades: BTreeMap<String, u32>,
}

impl Default for HomeState {
    fn default() -> Self {
        let mut upgrades = BTreeMap::new();
        upgrades.insert("kitchen".to_string(), 1);
        upgrades.insert("bedroom".to_string(), 1);
        Self {
            cleanliness: 50,
            comfort: 50,
            upgrades,
        }
    }
}

// ── Settings ───────────────────────────────────────

/// Player preferences. Carried in the document and round-tripped for
/// whatever shell drives the engine; only debug_mode is interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub high_contrast: bool,
    pub font_size: String,
    pub screen_reader_support: bool,
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            font_size: "medium".to_string(),
            screen_reader_support: false,
            debug_mode: false,
        }
    }
}

// ── The document ───────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub character: Character,
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub calendar: Calendar,
    #[serde(default = "default_location")]
    pub location: String,
    /// Location name -> visit count.
    #[serde(default)]
    pub visited: BTreeMap<String, u32>,
    #[serde(default)]
    pub family: FamilyState,
    #[serde(default)]
    pub farm: FarmState,
    #[serde(default)]
    pub trade: TradeState,
    #[serde(default)]
    pub missions: MissionState,
    #[serde(default)]
    pub events: EventState,
    #[serde(default)]
    pub relationships: RelationshipState,
    #[serde(default)]
    pub education: EducationState,
    #[serde(default)]
    pub home: HomeState,
    #[serde(default)]
    pub settings: Settings,
}

pub fn default_location() -> String {
    "Lar Familiar".to_string()
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            character: Character::default(),
            resources: Resources::default(),
            calendar: Calendar::default(),
            location: default_location(),
            visited: BTreeMap::new(),
            family: FamilyState::default(),
            farm: FarmState::default(),
            trade: TradeState::default(),
            missions: MissionState::default(),
            events: EventState::default(),
            relationships: RelationshipState::default(),
            education: EducationState::default(),
            home: HomeState::default(),
            settings: Settings::default(),
        }
    }
}

impl GameState {
    /// A fresh run at day zero, standing in the family home.
    pub fn new_run() -> Self {
        let mut state = Self {
            location: default_location(),
            ..Self::default()
        };
        state.visited.insert(state.location.clone(), 1);
        state
    }
}
