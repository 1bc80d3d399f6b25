use crate::{
    CityQuery, Config, FetchError, WeatherSnapshot, provider::weatherapi::WeatherApiFetcher,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// Source of current weather for a city.
///
/// One call is one best-effort attempt: implementations do not retry or cache.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, city: &CityQuery) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the HTTP fetcher from config.
///
/// A missing API key is not an error here: the request goes out with an empty
/// key and the provider rejects it, which surfaces as a normal fetch failure.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherFetcher>> {
    let api_key = match config.api_key() {
        Some(key) => key.to_owned(),
        None => {
            tracing::warn!("no WeatherAPI key configured; requests will be rejected upstream");
            String::new()
        }
    };

    let fetcher = WeatherApiFetcher::with_base_url(api_key, config.base_url())?;
    Ok(Arc::new(fetcher))
}
