use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    model::{Reading, WeatherRecord},
};

use super::{LookupError, WeatherLookup};

const GEOCODING_ENDPOINT: &str = "geocoding";
const FORECAST_ENDPOINT: &str = "forecast";

/// Geocodes with Open-Meteo's search API, then reads current conditions.
#[derive(Debug, Clone)]
pub struct OpenMeteoLookup {
    geocoding_base_url: String,
    weather_base_url: String,
    http: Client,
}

impl OpenMeteoLookup {
    pub fn new(geocoding_base_url: impl Into<String>, weather_base_url: impl Into<String>) -> Self {
        Self {
            geocoding_base_url: trim_base(geocoding_base_url.into()),
            weather_base_url: trim_base(weather_base_url.into()),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.geocoding_base_url, &config.weather_base_url)
    }

    /// `Ok(None)` means the geocoder had no match for `city`.
    pub async fn try_resolve(&self, city: &str) -> Result<Option<WeatherRecord>, LookupError> {
        let Some(place) = self.geocode(city).await? else {
            return Ok(None);
        };

        let current = self.fetch_current(place.latitude, place.longitude).await?;

        Ok(Some(WeatherRecord {
            name: place.name,
            temperature: Reading::Value(current.temperature),
            // current_weather carries no humidity
            humidity: Reading::Unavailable,
            condition: format!("Wind {} km/h", current.windspeed),
            observed_at: current.time.as_deref().and_then(parse_observation_time),
        }))
    }

    async fn geocode(&self, city: &str) -> Result<Option<GeoMatch>, LookupError> {
        let url = format!("{}/v1/search", self.geocoding_base_url);
        debug!(url = %url, city, "Geocoding city");

        let req = self.http.get(&url).query(&[("name", city), ("count", "1")]);
        let parsed: GeoResponse = get_json(req, GEOCODING_ENDPOINT).await?;

        Ok(parsed.results.unwrap_or_default().into_iter().next())
    }

    async fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather, LookupError> {
        let url = format!("{}/v1/forecast", self.weather_base_url);
        debug!(url = %url, lat = latitude, lon = longitude, "Fetching current weather");

        let req = self.http.get(&url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
        ]);
        let parsed: ForecastResponse = get_json(req, FORECAST_ENDPOINT).await?;

        Ok(parsed.current_weather)
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteoLookup {
    #[instrument(skip(self))]
    async fn resolve_weather(&self, city: &str) -> WeatherRecord {
        match self.try_resolve(city).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(city, "No geocoding match");
                WeatherRecord::not_found(city)
            }
            Err(err) => {
                warn!(city, error = %err, "Live weather lookup failed");
                WeatherRecord::fetch_error(city)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Option<Vec<GeoMatch>>,
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    #[serde(default)]
    time: Option<String>,
}

async fn get_json<T: for<'de> Deserialize<'de>>(
    req: reqwest::RequestBuilder,
    endpoint: &'static str,
) -> Result<T, LookupError> {
    let res = req
        .send()
        .await
        .map_err(|source| LookupError::Request { endpoint, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| LookupError::Request { endpoint, source })?;

    if !status.is_success() {
        return Err(LookupError::Status { endpoint, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| LookupError::Parse { endpoint, source })
}

fn parse_observation_time(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|ndt| ndt.and_utc())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
