use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, CountryTable, LocationCollector, LocationError, provider::provider_from_config, report,
};
use inquire::{Password, PasswordDisplayMode};
use tracing::{debug, info};

use crate::prompt::{TerminalPrompt, into_location_error};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "5-day weather forecast in 3-hour steps")]
pub struct Cli {
    /// Defaults to `show` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask for a city and country, then print the forecast.
    Show,

    /// Store the OpenWeatherMap API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Show) {
            Command::Show => show().await,
            Command::Configure => configure(),
        }
    }
}

async fn show() -> anyhow::Result<()> {
    let config = Config::load()?;
    let table = CountryTable::bundled().context("Failed to load bundled country table")?;
    debug!(countries = table.len(), "country table loaded");

    let collector = LocationCollector::new(&table).with_max_attempts(config.max_attempts);
    let location = match collector.run(&mut TerminalPrompt) {
        Ok(location) => location,
        Err(LocationError::Cancelled) => {
            info!("location input cancelled");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let provider = provider_from_config(&config);
    let mut stdout = std::io::stdout().lock();
    report::run(provider.as_ref(), &location, config.units, &chrono::Local, &mut stdout).await?;

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    // File values only, so an exported WEATHER_KEY is not written to disk.
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let key = match Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
    {
        Ok(key) => key,
        Err(e) => match into_location_error(e) {
            LocationError::Cancelled => return Ok(()),
            other => return Err(other).context("Failed to read API key"),
        },
    };

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(key.to_string());
    config.save_to(&path)?;
    println!("Saved API key to {}", path.display());

    Ok(())
}
