//! Fetch a forecast and print it.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use tracing::{error, info};

use crate::{
    format::{ForecastEntry, render_entry},
    model::{LocationQuery, Units},
    provider::ForecastProvider,
};

/// Printed once when the forecast could not be retrieved.
pub const APOLOGY: &str = "Sorry, could not get weather";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The fetch failed; nothing but the apology was printed.
    Unavailable,
    Shown { shown: usize, skipped: usize },
}

/// Fetch the forecast for `location` and write it to `out`.
///
/// A failed fetch prints [`APOLOGY`] and no entries. Malformed entries are
/// logged, replaced by a short notice, and the rest are still printed.
pub async fn run<P, Tz, W>(
    provider: &P,
    location: &LocationQuery,
    units: Units,
    tz: &Tz,
    out: &mut W,
) -> Result<ReportOutcome>
where
    P: ForecastProvider + ?Sized,
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    let response = match provider.get_forecast(location).await {
        Ok(response) => response,
        Err(e) => {
            error!(%location, error = %e, "could not fetch forecast");
            writeln!(out, "{APOLOGY}").context("Failed to write forecast output")?;
            return Ok(ReportOutcome::Unavailable);
        }
    };

    let entries: Vec<_> = response.list.iter().map(ForecastEntry::from_value).collect();

    let window = entries
        .iter()
        .filter_map(|e| e.as_ref().ok())
        .map(|e| e.time)
        .fold(None, |acc: Option<(DateTime<Utc>, DateTime<Utc>)>, t| match acc {
            None => Some((t, t)),
            Some((first, last)) => Some((first.min(t), last.max(t))),
        });

    write!(out, "{}", banner(location, window, tz)).context("Failed to write forecast output")?;

    let (mut shown, mut skipped) = (0, 0);
    for (idx, entry) in entries.iter().enumerate() {
        match entry {
            Ok(entry) => {
                writeln!(out, "{}", render_entry(entry, units, tz))
                    .context("Failed to write forecast output")?;
                shown += 1;
            }
            Err(e) => {
                error!(entry = idx + 1, error = %e, raw = %response.list[idx], "skipping forecast entry");
                writeln!(out, "Sorry, forecast entry {} could not be shown.\n", idx + 1)
                    .context("Failed to write forecast output")?;
                skipped += 1;
            }
        }
    }

    info!(shown, skipped, "forecast printed");
    Ok(ReportOutcome::Shown { shown, skipped })
}

fn banner<Tz>(location: &LocationQuery, window: Option<(DateTime<Utc>, DateTime<Utc>)>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut text = format!("\n{} - 5 day forecast in 3 hour intervals\n", location.to_string().to_uppercase());

    if let Some((first, last)) = window {
        let fmt = "%a %d %b %H:%M";
        text.push_str(&format!(
            "From {} to {}\n",
            first.with_timezone(tz).format(fmt),
            last.with_timezone(tz).format(fmt),
        ));
    }

    text.push('\n');
    text
}
