//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The bundled country name -> code table
//! - The interactive location collector (as a state machine behind a `Prompt` trait)
//! - The forecast provider abstraction and its OpenWeatherMap client
//! - Per-entry decoding/formatting and the report printer
//! - Configuration & credentials handling
//!
//! It is used by `forecast-cli`, but the pieces can be driven without a terminal.

pub mod config;
pub mod country;
pub mod format;
pub mod location;
pub mod model;
pub mod provider;
pub mod report;

pub use config::Config;
pub use country::{CountryEntry, CountryTable};
pub use format::{EntryError, ForecastEntry};
pub use location::{LocationCollector, LocationError, Prompt};
pub use model::{ForecastResponse, LocationQuery, Units};
pub use provider::{FetchError, ForecastProvider, OpenWeatherClient};
pub use report::ReportOutcome;
