use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};
use cityweather_core::{
    CityQuery, Config, FileStorage, SearchHistoryStore, ViewState, WeatherView,
    fetcher_from_config,
};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

use crate::{complete::HistoryCompleter, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Directory holding search history (defaults to the platform data dir).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and the default city.
    Configure,

    /// Show current weather once.
    Show {
        /// City name; the configured default city when absent.
        city: Option<String>,

        /// Print the reading as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List recent searches.
    History {
        /// Only entries starting with this text (case-insensitive).
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Search interactively, with recent cities offered as you type.
    Watch,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => {
                let city = match city {
                    Some(raw) => Some(
                        CityQuery::new(&raw).ok_or_else(|| anyhow!("City name must not be empty"))?,
                    ),
                    None => None,
                };
                let config = load_config()?;
                show(&config, self.data_dir, city, json).await
            }
            Command::History { prefix } => {
                let data_dir = match self.data_dir {
                    Some(dir) => dir,
                    None => load_config()?.data_dir()?,
                };
                let store = SearchHistoryStore::new(FileStorage::new(data_dir));
                let history = store.load();
                let prefix = prefix.as_deref().unwrap_or("");
                let matches = SearchHistoryStore::suggestions(prefix, &history);
                println!("{}", render::history(&matches));
                Ok(())
            }
            Command::Watch => {
                let config = load_config()?;
                watch(&config, self.data_dir).await
            }
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    Ok(Config::load()?.with_env_overrides(|name| std::env::var(name).ok()))
}

fn build_view(
    config: &Config,
    data_dir: Option<PathBuf>,
    city: CityQuery,
) -> anyhow::Result<WeatherView> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "using search history storage");
    let fetcher = fetcher_from_config(config)?;
    let store = SearchHistoryStore::new(FileStorage::new(data_dir));

    Ok(WeatherView::new(fetcher, store, city))
}

fn default_city(config: &Config) -> anyhow::Result<CityQuery> {
    CityQuery::new(config.default_city()).context("Configured default city is empty")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let city = Text::new("Default city:").with_default(config.default_city()).prompt()?;
    if let Some(city) = CityQuery::new(&city) {
        config.default_city = Some(city.to_string());
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    config: &Config,
    data_dir: Option<PathBuf>,
    city: Option<CityQuery>,
    json: bool,
) -> anyhow::Result<()> {
    let city = match city {
        Some(city) => city,
        None => default_city(config)?,
    };

    let mut view = build_view(config, data_dir, city)?;
    view.mount().await;

    match view.state() {
        ViewState::Ready(snapshot) if json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        ViewState::Ready(snapshot) => println!("{}", render::snapshot_card(snapshot)),
        ViewState::Error(message) => bail!("{message}"),
        ViewState::Loading => bail!("Weather request did not complete"),
    }

    Ok(())
}

async fn watch(config: &Config, data_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let mut view = build_view(config, data_dir, default_city(config)?)?;

    println!("{}", render::state(view.state()));
    view.mount().await;
    println!("{}\n", render::state(view.state()));

    loop {
        let completer = HistoryCompleter::new(view.history().clone());
        let answer = Text::new("City:")
            .with_initial_value(view.input().value())
            .with_autocomplete(completer)
            .with_help_message("Enter a recent search to pick it, Tab completes, Esc quits")
            .prompt();

        let text = match answer {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let Some(ticket) = view.enter(&text) else { continue };

        println!("{}", render::state(view.state()));
        let outcome = view.fetch_future(ticket).await;
        view.apply(outcome);
        println!("{}\n", render::state(view.state()));
    }

    Ok(())
}
