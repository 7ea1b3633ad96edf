use crate::model::WeatherRecord;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod open_meteo;

pub use open_meteo::OpenMeteoLookup;

/// Turns a city name into a display-ready record.
///
/// Implementations never fail outward: a city that cannot be resolved or a
/// failed request comes back as a placeholder record.
#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn resolve_weather(&self, city: &str) -> WeatherRecord;
}

/// Failure inside a lookup, before it is folded into a placeholder record.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Failed to send {endpoint} request: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} JSON: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
