use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use tracing::debug;
use weather_compare_core::{Config, JsonFileStore, OpenMeteoLookup, SessionController};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-compare", version, about = "Look up and compare city weather")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Search {
        city: String,

        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare cities side by side; each city fills the next slot.
    Compare {
        #[arg(required = true)]
        cities: Vec<String>,

        /// Print both slots as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage saved favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Set the geocoding and weather service URLs.
    Configure,

    /// Prompt-driven session: search, compare and manage favorites.
    Interactive,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorites in insertion order.
    List,
    /// Add a city.
    Add { city: String },
    /// Remove a city.
    Remove { city: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        debug!(?config, "Loaded configuration");

        match self.command {
            Command::Search { city, json } => {
                let mut session = session_from_config(&config)?;
                session.search(&city).await;
                match session.view().single() {
                    Some(record) if json => {
                        println!("{}", serde_json::to_string_pretty(record)?);
                    }
                    Some(record) => println!("{}", render::record(record)),
                    None => println!("Nothing to show for an empty city name."),
                }
            }
            Command::Compare { cities, json } => {
                let mut session = session_from_config(&config)?;
                for city in &cities {
                    session.compare(city).await;
                }
                if json {
                    println!("{}", serde_json::to_string_pretty(session.view())?);
                } else {
                    println!("{}", render::view(session.view()));
                }
            }
            Command::Favorites { action } => {
                let mut session = session_from_config(&config)?;
                match action {
                    FavoritesAction::List => {}
                    FavoritesAction::Add { city } => session.save_favorite(&city),
                    FavoritesAction::Remove { city } => session.remove_favorite(&city),
                }
                println!("{}", render::favorites(session.favorites()));
            }
            Command::Configure => {
                let updated = configure(config)?;
                match &self.config {
                    Some(path) => updated.save_to(path)?,
                    None => updated.save()?,
                }
                println!("Configuration saved.");
            }
            Command::Interactive => {
                let session = session_from_config(&config)?;
                interactive::run(session).await?;
            }
        }

        Ok(())
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

pub type Session = SessionController<OpenMeteoLookup, JsonFileStore>;

fn session_from_config(config: &Config) -> anyhow::Result<Session> {
    let lookup = OpenMeteoLookup::from_config(config);
    let store =
        JsonFileStore::from_config(config).context("Failed to locate the favorites file")?;
    Ok(SessionController::new(lookup, store))
}

fn configure(mut config: Config) -> anyhow::Result<Config> {
    config.geocoding_base_url = Text::new("Geocoding service URL:")
        .with_default(&config.geocoding_base_url)
        .prompt()?;
    config.weather_base_url = Text::new("Weather service URL:")
        .with_default(&config.weather_base_url)
        .prompt()?;
    Ok(config)
}
