//! Plain-text rendering of the view.

use cityweather_core::{ViewState, WeatherSnapshot};

pub fn state(state: &ViewState) -> String {
    match state {
        ViewState::Loading => "Loading...".to_string(),
        ViewState::Error(message) => format!("Error: {message}"),
        ViewState::Ready(snapshot) => snapshot_card(snapshot),
    }
}

pub fn snapshot_card(s: &WeatherSnapshot) -> String {
    format!(
        "{name}\n{time}\n\n\
         {condition}  {temp}°C\n\
         Feels like  {feels}°C\n\
         Humidity    {humidity}%\n\
         Wind        {wind} km/h\n\
         Wind dir    {wind_dir}\n\
         UV index    {uv}\n\
         Pressure    {pressure} mb\n\
         Icon        {icon}",
        name = s.location_name,
        time = s.local_time,
        condition = s.condition,
        temp = s.temperature_c,
        feels = s.feels_like_c,
        humidity = s.humidity_pct,
        wind = s.wind_kph,
        wind_dir = s.wind_dir,
        uv = s.uv_index,
        pressure = s.pressure_mb,
        icon = s.icon_url(),
    )
}

pub fn history<S: AsRef<str>>(entries: &[S]) -> String {
    if entries.is_empty() {
        return "No recent searches".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, city)| format!("{}. {}", i + 1, city.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
