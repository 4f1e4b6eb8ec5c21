//! The in-game calendar: days, weeks, months, years, seasons, weather.
//!
//! RULE: The calendar advances exactly once per engine tick, before any
//! subsystem runs. Rollover cascades strictly: day -> week -> month -> year.
//! One in-game year is 7 * 4 * 12 = 336 days.

use crate::rng::SubsystemRng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DAYS_PER_WEEK: u32 = 7;
pub const WEEKS_PER_MONTH: u32 = 4;
pub const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        };
        write!(f, "{s}")
    }
}

impl Season {
    /// Months 3-5 spring, 6-8 summer, 9-11 autumn, the rest winter.
    pub fn for_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Sun,
    Rain,
    Cloudy,
    Snow,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sun => "Sun",
            Self::Rain => "Rain",
            Self::Cloudy => "Cloudy",
            Self::Snow => "Snow",
        };
        write!(f, "{s}")
    }
}

impl Weather {
    /// Weather candidates and weights per season. Snow only in winter.
    fn table(season: Season) -> (&'static [Weather], &'static [f64]) {
        match season {
            Season::Spring => (&[Weather::Sun, Weather::Rain, Weather::Cloudy], &[0.45, 0.30, 0.25]),
            Season::Summer => (&[Weather::Sun, Weather::Cloudy], &[0.70, 0.30]),
            Season::Autumn => (&[Weather::Rain, Weather::Cloudy, Weather::Sun], &[0.40, 0.35, 0.25]),
            Season::Winter => (&[Weather::Snow, Weather::Cloudy, Weather::Rain], &[0.40, 0.35, 0.25]),
        }
    }

    pub fn roll(season: Season, rng: &mut SubsystemRng) -> Self {
        let (candidates, weights) = Self::table(season);
        candidates[rng.weighted_index(weights)]
    }
}

/// What changed during a single calendar advance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarDelta {
    pub week_rolled: bool,
    pub month_rolled: bool,
    pub year_rolled: bool,
    pub season_changed: Option<Season>,
}

/// The calendar slice of the game state document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: u32,
    /// Total days elapsed since the run began. Never resets.
    pub day_count: u64,
    pub season: Season,
    pub weather: Weather,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            day: 1,
            week: 1,
            month: 1,
            year: 1,
            day_count: 0,
            season: Season::Winter,
            weather: Weather::Sun,
        }
    }
}

impl Calendar {
    /// Advance one day, cascading rollovers and rolling new weather.
    pub fn advance(&mut self, rng: &mut SubsystemRng) -> CalendarDelta {
        let mut delta = CalendarDelta::default();
        self.day_count += 1;
        self.day += 1;

        if self.day > DAYS_PER_WEEK {
            self.day = 1;
            self.week += 1;
            delta.week_rolled = true;
        }
        if self.week > WEEKS_PER_MONTH {
            self.week = 1;
            self.month += 1;
            delta.month_rolled = true;
        }
        if self.month > MONTHS_PER_YEAR {
            self.month = 1;
            self.year += 1;
            delta.year_rolled = true;
        }

        let season = Season::for_month(self.month);
        if season != self.season {
            self.season = season;
            delta.season_changed = Some(season);
        }

        self.weather = Weather::roll(self.season, rng);
        delta
    }
}
