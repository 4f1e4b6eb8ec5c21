//! Static game data: contacts, locations, crops, market goods, courses.
//!
//! Data ships as JSON files under data/. Each file is loaded
//! independently; a missing or unparsable file falls back to the
//! built-in defaults for that file alone and produces a warning notice,
//! so one bad data file never takes the whole run down.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::calendar::Season;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcConfig {
    pub name: String,
    pub role: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub icon: String,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropConfig {
    pub seed_cost: i64,
    pub growth_days: u64,
    pub base_yield: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalConfig {
    pub cost: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketGood {
    pub item: String,
    pub base_price: i64,
    pub base_stock: i64,
}

/// Which permanent skill a course trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseSkill {
    Farming,
    Trading,
    Social,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    pub name: String,
    pub skill: CourseSkill,
}

/// The festival held once per season. Fixed table, not data-driven.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalEventConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub npcs: Vec<NpcConfig>,
    pub locations: Vec<LocationConfig>,
    pub crops: BTreeMap<String, CropConfig>,
    pub animals: BTreeMap<String, AnimalConfig>,
    pub market: Vec<MarketGood>,
    pub courses: Vec<CourseConfig>,
}

impl GameConfig {
    /// Load all data files from `data_dir`. Returns the config plus
    /// warning notices for every file that fell back to defaults.
    pub fn load(data_dir: &Path) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let npcs = load_file(data_dir, "npcs.json", default_npcs, &mut warnings);
        let locations = load_file(data_dir, "locations.json", default_locations, &mut warnings);
        let crops = load_file(data_dir, "crops.json", default_crops, &mut warnings);
        let animals = load_file(data_dir, "animals.json", default_animals, &mut warnings);
        let market = load_file(data_dir, "market.json", default_market, &mut warnings);
        let courses = load_file(data_dir, "courses.json", default_courses, &mut warnings);

        (
            Self {
                npcs,
                locations,
                crops,
                animals,
                market,
                courses,
            },
            warnings,
        )
    }

    /// The built-in data set, used when no data directory is given.
    pub fn default_game() -> Self {
        Self {
            npcs: default_npcs(),
            locations: default_locations(),
            crops: default_crops(),
            animals: default_animals(),
            market: default_market(),
            courses: default_courses(),
        }
    }

    /// Config for use in unit tests.
    pub fn default_test() -> Self {
        Self::default_game()
    }

    pub fn location_exists(&self, name: &str) -> bool {
        self.locations.iter().any(|l| l.name == name)
    }

    pub fn crop(&self, kind: &str) -> Option<&CropConfig> {
        self.crops.get(kind)
    }

    pub fn animal(&self, kind: &str) -> Option<&AnimalConfig> {
        self.animals.get(kind)
    }

    pub fn course(&self, name: &str) -> Option<&CourseConfig> {
        self.courses.iter().find(|c| c.name == name)
    }

    pub fn npc(&self, name: &str) -> Option<&NpcConfig> {
        self.npcs.iter().find(|n| n.name == name)
    }

    pub fn seasonal_event(season: Season) -> SeasonalEventConfig {
        match season {
            Season::Spring => SeasonalEventConfig {
                id: "festival-primavera",
                name: "Festival da Primavera",
                location: "Parque",
            },
            Season::Summer => SeasonalEventConfig {
                id: "festival-verao",
                name: "Festival de Verão",
                location: "Parque",
            },
            Season::Autumn => SeasonalEventConfig {
                id: "feira-outono",
                name: "Feira de Outono",
                location: "Fazenda",
            },
            Season::Winter => SeasonalEventConfig {
                id: "festa-inverno",
                name: "Festa de Inverno",
                location: "Parque",
            },
        }
    }
}

fn load_file<T, F>(data_dir: &Path, file: &str, fallback: F, warnings: &mut Vec<String>) -> T
where
    T: serde::de::DeserializeOwned,
    F: FnOnce() -> T,
{
    let path = data_dir.join(file);
    match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::warn!(
                    "data file {} is unparsable ({err}), using defaults",
                    path.display()
                );
                warnings.push(format!("Data file {file} could not be read; using defaults."));
                fallback()
            }
        },
        Err(err) => {
            log::warn!(
                "data file {} is missing ({err}), using defaults",
                path.display()
            );
            warnings.push(format!("Data file {file} not found; using defaults."));
            fallback()
        }
    }
}

fn default_npcs() -> Vec<NpcConfig> {
    vec![
        NpcConfig {
            name: "Comerciante".to_string(),
            role: "Vendedor".to_string(),
            location: "Shopping".to_string(),
        },
        NpcConfig {
            name: "Professor".to_string(),
            role: "Educador".to_string(),
            location: "Creche".to_string(),
        },
        NpcConfig {
            name: "Fazendeiro".to_string(),
            role: "Produtor".to_string(),
            location: "Fazenda".to_string(),
        },
    ]
}

fn default_locations() -> Vec<LocationConfig> {
    vec![
        LocationConfig {
            name: "Lar Familiar".to_string(),
            icon: "🏠".to_string(),
            activities: vec!["rest".to_string(), "eat".to_string(), "clean".to_string()],
        },
        LocationConfig {
            name: "Creche".to_string(),
            icon: "🏫".to_string(),
            activities: vec!["enroll".to_string(), "study".to_string()],
        },
        LocationConfig {
            name: "Fazenda".to_string(),
            icon: "🌾".to_string(),
            activities: vec![
                "plant".to_string(),
                "harvest".to_string(),
                "feed".to_string(),
            ],
        },
        LocationConfig {
            name: "Shopping".to_string(),
            icon: "🛍️".to_string(),
            activities: vec!["buy".to_string(), "sell".to_string()],
        },
        LocationConfig {
            name: "Parque".to_string(),
            icon: "🌳".to_string(),
            activities: vec!["socialize".to_string()],
        },
    ]
}

fn default_crops() -> BTreeMap<String, CropConfig> {
    let mut crops = BTreeMap::new();
    crops.insert(
        "Trigo".to_string(),
        CropConfig {
            seed_cost: 10,
            growth_days: 3,
            base_yield: 10,
        },
    );
    crops.insert(
        "Milho".to_string(),
        CropConfig {
            seed_cost: 15,
            growth_days: 5,
            base_yield: 18,
        },
    );
    crops.insert(
        "Cenoura".to_string(),
        CropConfig {
            seed_cost: 8,
            growth_days: 2,
            base_yield: 7,
        },
    );
    crops
}

fn default_animals() -> BTreeMap<String, AnimalConfig> {
    let mut animals = BTreeMap::new();
    animals.insert("Galinha".to_string(), AnimalConfig { cost: 50 });
    animals.insert("Vaca".to_string(), AnimalConfig { cost: 120 });
    animals
}

fn default_market() -> Vec<MarketGood> {
    vec![
        MarketGood {
            item: "Trigo".to_string(),
            base_price: 5,
            base_stock: 20,
        },
        MarketGood {
            item: "Ração".to_string(),
            base_price: 10,
            base_stock: 15,
        },
        MarketGood {
            item: "Sementes".to_string(),
            base_price: 8,
            base_stock: 30,
        },
    ]
}

fn default_courses() -> Vec<CourseConfig> {
    vec![
        CourseConfig {
            name: "Agricultura Básica".to_string(),
            skill: CourseSkill::Farming,
        },
        CourseConfig {
            name: "Comércio Básico".to_string(),
            skill: CourseSkill::Trading,
        },
        CourseConfig {
            name: "Habilidades Sociais".to_string(),
            skill: CourseSkill::Social,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let config = GameConfig::default_game();
        assert_eq!(config.locations.len(), 5);
        assert!(config.location_exists("Fazenda"));
        assert!(config.crop("Trigo").is_some());
        for npc in &config.npcs {
            assert!(
                config.location_exists(&npc.location),
                "{} home missing",
                npc.name
            );
        }
    }

    #[test]
    fn missing_data_dir_falls_back_with_warnings() {
        let (config, warnings) = GameConfig::load(Path::new("/nonexistent"));
        assert_eq!(config.npcs.len(), 3);
        assert_eq!(warnings.len(), 6);
    }

    #[test]
    fn every_season_has_a_festival() {
        for season in [
            Season::Spring,
            Season::Summer,
            Season::Autumn,
            Season::Winter,
        ] {
            let ev = GameConfig::seasonal_event(season);
            assert!(!ev.id.is_empty());
        }
    }
}
