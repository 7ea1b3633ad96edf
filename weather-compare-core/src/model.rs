use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const CITY_NOT_FOUND: &str = "City not found";
pub const ERROR_FETCHING_WEATHER: &str = "Error fetching weather";

/// A numeric reading that the upstream source may not supply.
///
/// `Unavailable` is distinct from a zero reading and renders as `--`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reading {
    Value(f64),
    Unavailable,
}

impl Reading {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Reading::Unavailable)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => write!(f, "{v}"),
            Reading::Unavailable => f.write_str("--"),
        }
    }
}

/// Display-ready weather for one city. Replaced wholesale on every lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    /// Resolved display name, or the raw input for placeholder records.
    pub name: String,
    pub temperature: Reading,
    pub humidity: Reading,
    pub condition: String,
    /// Observation time reported by the conditions endpoint, if any.
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherRecord {
    pub fn not_found(city: &str) -> Self {
        Self::placeholder(city, CITY_NOT_FOUND)
    }

    pub fn fetch_error(city: &str) -> Self {
        Self::placeholder(city, ERROR_FETCHING_WEATHER)
    }

    fn placeholder(city: &str, condition: &str) -> Self {
        Self {
            name: city.to_string(),
            temperature: Reading::Unavailable,
            humidity: Reading::Unavailable,
            condition: condition.to_string(),
            observed_at: None,
        }
    }

    /// True for both not-found and fetch-error records.
    pub fn is_placeholder(&self) -> bool {
        self.condition == CITY_NOT_FOUND || self.condition == ERROR_FETCHING_WEATHER
    }
}

/// Which comparison slot the next compare action fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Left,
    Right,
}

impl Slot {
    pub fn flip(self) -> Self {
        match self {
            Slot::Left => Slot::Right,
            Slot::Right => Slot::Left,
        }
    }
}

/// What the session is currently showing.
///
/// Single-result and comparison are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Idle,
    Single(WeatherRecord),
    Comparing {
        left: Option<WeatherRecord>,
        right: Option<WeatherRecord>,
    },
}

impl ViewMode {
    pub fn single(&self) -> Option<&WeatherRecord> {
        match self {
            ViewMode::Single(record) => Some(record),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<&WeatherRecord> {
        match self {
            ViewMode::Comparing { left, .. } => left.as_ref(),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&WeatherRecord> {
        match self {
            ViewMode::Comparing { right, .. } => right.as_ref(),
            _ => None,
        }
    }

    pub fn is_comparing(&self) -> bool {
        matches!(self, ViewMode::Comparing { .. })
    }
}
