use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

use crate::{Config, ForecastResponse, LocationQuery};

pub mod openweather;

pub use openweather::OpenWeatherClient;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to reach forecast endpoint: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Forecast request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse forecast JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl FetchError {
    /// Raw response body, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            FetchError::Request(_) => None,
            FetchError::Status { body, .. } | FetchError::Decode { body, .. } => Some(body),
        }
    }
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the multi-day forecast for `location` with a single request.
    async fn get_forecast(&self, location: &LocationQuery) -> Result<ForecastResponse, FetchError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Box<dyn ForecastProvider> {
    Box::new(OpenWeatherClient::from_config(config))
}
