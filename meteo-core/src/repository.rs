//! Adapters from the Open-Meteo HTTP APIs to domain objects.
//!
//! Every operation returns a [`RepositoryResult`]; expected failures never panic
//! and never surface as a raw transport error type.

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    client::ClientError,
    error::ValidationError,
    model::{City, WeatherReport, WeatherRequest},
};

pub mod cities;
pub mod forecast;
pub mod historical;

pub use cities::CitiesRepository;
pub use forecast::ForecastWeatherRepository;
pub use historical::HistoricalWeatherRepository;

/// Hourly variables requested from both weather endpoints.
pub const HOURLY_VARIABLES: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Rejected before any request was made.
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Transport(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Unexpected(&'static str),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        RepositoryError::InvalidInput(message.into())
    }

    /// A response that decoded but did not pass validation.
    pub(crate) fn rejected(err: ValidationError) -> Self {
        tracing::warn!(error = %err, "response failed validation");
        RepositoryError::Validation(err)
    }

    /// Transport failures keep their message; anything else collapses to `generic`.
    pub(crate) fn from_client(err: ClientError, generic: &'static str) -> Self {
        if err.is_transport() {
            RepositoryError::Transport(err.to_string())
        } else {
            tracing::warn!(error = %err, "unexpected response");
            RepositoryError::Unexpected(generic)
        }
    }
}

#[async_trait]
pub trait WeatherRepository: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> RepositoryResult<WeatherReport>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync + Debug {
    async fn search_locations(&self, query: &str) -> RepositoryResult<Vec<City>>;
}

pub(crate) fn check_coordinates(request: &WeatherRequest) -> RepositoryResult<()> {
    if !request.latitude.is_finite() || !request.longitude.is_finite() {
        return Err(RepositoryError::invalid_input("Invalid latitude or longitude"));
    }
    Ok(())
}
