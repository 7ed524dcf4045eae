//! Interactive collection of the city/country pair.
//!
//! The collector is a small state machine fed one line of input at a time.
//! [`LocationCollector::run`] drives it through a [`Prompt`] until a
//! [`LocationQuery`] is resolved, the prompt is cancelled, or the optional
//! retry limit is hit.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::{
    country::CountryTable,
    model::{LocationQuery, is_valid_city},
};

pub const CITY_PROMPT: &str = "Enter the city name: ";
pub const COUNTRY_PROMPT: &str = "Enter country name: ";

/// Minimum length of a country name once whitespace is removed.
const MIN_COUNTRY_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    City,
    Country,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::City => f.write_str("city"),
            Field::Country => f.write_str("country"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location input was cancelled")]
    Cancelled,

    #[error("Gave up after {attempts} invalid {field} entries")]
    TooManyAttempts { field: Field, attempts: u32 },

    #[error("Failed to read input: {0}")]
    Input(String),

    #[error("Invalid city name '{0}'")]
    InvalidCity(String),

    #[error("Invalid country code '{0}'")]
    InvalidCountryCode(String),
}

/// Source of user input.
pub trait Prompt {
    /// Show `message` and return the line the user typed.
    ///
    /// Return [`LocationError::Cancelled`] to abort collection.
    fn ask(&mut self, message: &str) -> Result<String, LocationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorState {
    AwaitingCity,
    AwaitingCountry { city: String },
    Resolved(LocationQuery),
}

#[derive(Debug)]
pub struct LocationCollector<'a> {
    table: &'a CountryTable,
    state: CollectorState,
    rejected: u32,
    max_attempts: Option<u32>,
}

impl<'a> LocationCollector<'a> {
    pub fn new(table: &'a CountryTable) -> Self {
        Self { table, state: CollectorState::AwaitingCity, rejected: 0, max_attempts: None }
    }

    /// Limit the number of rejected entries per field. `None` keeps asking forever.
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts.filter(|n| *n > 0);
        self
    }

    pub fn state(&self) -> &CollectorState {
        &self.state
    }

    /// Prompt text for the current state, `None` once resolved.
    pub fn prompt_message(&self) -> Option<&'static str> {
        match self.state {
            CollectorState::AwaitingCity => Some(CITY_PROMPT),
            CollectorState::AwaitingCountry { .. } => Some(COUNTRY_PROMPT),
            CollectorState::Resolved(_) => None,
        }
    }

    /// Feed one line of input and advance if it is acceptable.
    ///
    /// Rejected input leaves the state unchanged. Input after resolution is ignored.
    pub fn submit(&mut self, input: &str) -> Result<&CollectorState, LocationError> {
        let next = match &self.state {
            CollectorState::AwaitingCity => {
                let city = input.trim();
                is_valid_city(city)
                    .then(|| CollectorState::AwaitingCountry { city: city.to_string() })
            }
            CollectorState::AwaitingCountry { city } => self
                .resolve_country(input)
                .map(|code| LocationQuery::new(city, code))
                .transpose()?
                .map(CollectorState::Resolved),
            CollectorState::Resolved(_) => return Ok(&self.state),
        };

        match next {
            Some(state) => {
                self.state = state;
                self.rejected = 0;
            }
            None => {
                self.rejected += 1;
                let field = self.current_field();
                debug!(%field, rejected = self.rejected, "rejected location input");

                if let Some(max) = self.max_attempts
                    && self.rejected >= max
                {
                    return Err(LocationError::TooManyAttempts { field, attempts: self.rejected });
                }
            }
        }

        Ok(&self.state)
    }

    /// Ask until resolved, cancelled, or out of attempts.
    pub fn run<P: Prompt + ?Sized>(mut self, prompt: &mut P) -> Result<LocationQuery, LocationError> {
        loop {
            let message = match &self.state {
                CollectorState::Resolved(query) => return Ok(query.clone()),
                CollectorState::AwaitingCity => CITY_PROMPT,
                CollectorState::AwaitingCountry { .. } => COUNTRY_PROMPT,
            };
            let input = prompt.ask(message)?;
            self.submit(&input)?;
        }
    }

    fn resolve_country(&self, input: &str) -> Option<&'a str> {
        let stripped_len = input.chars().filter(|c| !c.is_whitespace()).count();
        if stripped_len < MIN_COUNTRY_LEN {
            return None;
        }

        self.table.lookup(input).filter(|code| !code.is_empty())
    }

    fn current_field(&self) -> Field {
        match self.state {
            CollectorState::AwaitingCity => Field::City,
            _ => Field::Country,
        }
    }
}
