//! Core library for the `weather-compare` CLI.
//!
//! This crate defines:
//! - The lookup adapter turning a city name into a display-ready record
//! - The session controller (single result, comparison slots, favorites)
//! - Favorites persistence and configuration handling
//!
//! It is used by `weather-compare-cli`, but can also be driven by other front ends.

pub mod config;
pub mod favorites;
pub mod lookup;
pub mod model;
pub mod session;

pub use config::Config;
pub use favorites::{FavoritesStore, JsonFileStore, MemoryStore};
pub use lookup::{LookupError, OpenMeteoLookup, WeatherLookup};
pub use model::{Reading, Slot, ViewMode, WeatherRecord};
pub use session::{LookupKind, LookupTicket, SessionController, SessionState};
