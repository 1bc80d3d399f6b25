//! Core library for the `cityweather` client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather fetcher abstraction and its WeatherAPI.com implementation
//! - Search history with a pluggable storage port
//! - Search box state and the view state machine tying it all together
//!
//! It is used by `cityweather-cli`, but can also be driven by other front ends.

pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod model;
pub mod provider;
pub mod storage;
pub mod view;

pub use config::Config;
pub use error::FetchError;
pub use history::{SearchHistory, SearchHistoryStore};
pub use input::InputController;
pub use model::{CityQuery, ViewState, WeatherSnapshot};
pub use provider::{WeatherFetcher, fetcher_from_config, weatherapi::WeatherApiFetcher};
pub use storage::{FileStorage, HistoryStorage, MemoryStorage};
pub use view::{FetchOutcome, FetchTicket, WeatherView};
