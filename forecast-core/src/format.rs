use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Number;
use thiserror::Error;

use crate::model::Units;

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Malformed forecast entry: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Forecast entry has no weather description")]
    MissingDescription,

    #[error("Forecast entry timestamp {0} is out of range")]
    Timestamp(i64),
}

#[derive(Debug, Deserialize)]
struct EntryMain {
    temp: Number,
}

#[derive(Debug, Deserialize)]
struct EntryWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct EntryWind {
    speed: Number,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    dt: i64,
    main: EntryMain,
    weather: Vec<EntryWeather>,
    wind: EntryWind,
}

/// One 3-hour forecast point.
///
/// Temperature and wind speed keep the provider's number as sent, so `72`
/// renders as `72` and `5.0` as `5.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature: Number,
    pub description: String,
    pub wind_speed: Number,
}

impl ForecastEntry {
    /// Decode one element of the provider's `list`.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, EntryError> {
        let raw = RawEntry::deserialize(value)?;

        let description = raw
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or(EntryError::MissingDescription)?;

        let time = DateTime::from_timestamp(raw.dt, 0).ok_or(EntryError::Timestamp(raw.dt))?;

        Ok(Self { time, temperature: raw.main.temp, description, wind_speed: raw.wind.speed })
    }
}

/// Render an entry as three lines, with the time shown in `tz`.
pub fn render_entry<Tz>(entry: &ForecastEntry, units: Units, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = entry.time.with_timezone(tz);

    format!(
        "{weekday} at {time}\nExpect {description}.\nTemperature will be {temp}{symbol} with winds speed of {wind} {speed}\n",
        weekday = local.format("%A"),
        time = local.format("%H:%M:%S"),
        description = entry.description,
        temp = entry.temperature,
        symbol = units.temperature_symbol(),
        wind = entry.wind_speed,
        speed = units.speed_label(),
    )
}
