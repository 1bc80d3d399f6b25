use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{CityQuery, FetchError, WeatherSnapshot};

use super::WeatherFetcher;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// WeatherAPI.com `current.json` client.
#[derive(Debug, Clone)]
pub struct WeatherApiFetcher {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiFetcher {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Same as [`new`](Self::new) but against another deployment, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: &str) -> anyhow::Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid WeatherAPI base URL: {base_url}"))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        })
    }

    /// Request URL for the current conditions of `city`, with the key and
    /// the escaped city name in the query string.
    pub fn current_url(&self, city: &CityQuery) -> Result<Url, FetchError> {
        Url::parse_with_params(
            &format!("{}/current.json", self.base_url),
            &[("key", self.api_key.as_str()), ("q", city.as_str())],
        )
        .map_err(|e| FetchError::NetworkFailure(format!("could not build request URL: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    localtime: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    wind_dir: String,
    uv: f64,
    pressure_mb: f64,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaResponse> for WeatherSnapshot {
    fn from(parsed: WaResponse) -> Self {
        let current = parsed.current;

        WeatherSnapshot {
            location_name: parsed.location.name,
            local_time: parsed.location.localtime,
            condition: current.condition.text,
            condition_icon: current.condition.icon,
            temperature_c: current.temp_c,
            feels_like_c: current.feelslike_c,
            humidity_pct: current.humidity,
            wind_kph: current.wind_kph,
            wind_dir: current.wind_dir,
            uv_index: current.uv,
            pressure_mb: current.pressure_mb,
            observed_at: current.last_updated_epoch.and_then(unix_to_utc),
        }
    }
}

#[async_trait]
impl WeatherFetcher for WeatherApiFetcher {
    async fn fetch(&self, city: &CityQuery) -> Result<WeatherSnapshot, FetchError> {
        let url = self.current_url(city)?;
        tracing::debug!(city = %city, "requesting current weather");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %truncate_body(&body), "WeatherAPI rejected request");
            return Err(FetchError::CityNotFound);
        }

        let body = res.text().await?;
        let parsed: WaResponse = serde_json::from_str(&body)?;

        Ok(parsed.into())
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
