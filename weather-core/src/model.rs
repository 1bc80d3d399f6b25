use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed, non-empty city name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    /// Trims `raw`; returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CityQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Current conditions for one city, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    /// Local time at the location, verbatim from the provider ("2024-05-01 14:30").
    pub local_time: String,
    pub condition: String,
    /// Protocol-relative icon path ("//cdn.weatherapi.com/...").
    pub condition_icon: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub uv_index: f64,
    pub pressure_mb: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    /// Absolute icon URL usable outside a browser.
    pub fn icon_url(&self) -> String {
        if self.condition_icon.starts_with("//") {
            format!("https:{}", self.condition_icon)
        } else {
            self.condition_icon.clone()
        }
    }
}

/// What the view is currently showing. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(String),
    Ready(WeatherSnapshot),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            ViewState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_snapshot(location_name: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        location_name: location_name.to_string(),
        local_time: "2024-05-01 14:30".to_string(),
        condition: "Partly cloudy".to_string(),
        condition_icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".to_string(),
        temperature_c: 29.0,
        feels_like_c: 33.4,
        humidity_pct: 79,
        wind_kph: 13.0,
        wind_dir: "WSW".to_string(),
        uv_index: 7.0,
        pressure_mb: 1009.0,
        observed_at: None,
    }
}
