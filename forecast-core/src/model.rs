use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::LocationError;

/// City plus resolved country code, sent as the provider's `q` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    city: String,
    country_code: String,
}

impl LocationQuery {
    /// Build a query from an already-validated city and a two-letter code.
    pub fn new(city: &str, country_code: &str) -> Result<Self, LocationError> {
        let city = city.trim();
        if !is_valid_city(city) {
            return Err(LocationError::InvalidCity(city.to_string()));
        }

        let code = country_code.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LocationError::InvalidCountryCode(code.to_string()));
        }

        Ok(Self { city: city.to_string(), country_code: code.to_ascii_uppercase() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.city, self.country_code)
    }
}

/// Non-empty and alphabetic once all whitespace is removed.
pub(crate) fn is_valid_city(city: &str) -> bool {
    let mut letters = city.chars().filter(|c| !c.is_whitespace()).peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

/// Measurement system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Imperial => "F",
            Units::Metric => "C",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            Units::Imperial => "miles/hour",
            Units::Metric => "meter/sec",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityInfo {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// Decoded forecast payload.
///
/// Entries stay as raw JSON so that a malformed entry can be reported on its
/// own without failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub city: Option<CityInfo>,
    pub list: Vec<serde_json::Value>,
}
