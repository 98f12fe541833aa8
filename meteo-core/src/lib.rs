//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Raw Open-Meteo payload shapes (DTOs)
//! - Validated value objects (temperature, humidity, wind speed, locations)
//! - The lazily validated [`WeatherReport`] aggregate
//! - HTTP repositories and use cases returning `Result` values
//! - Configuration handling
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod model;
pub mod repository;
pub mod time;
pub mod usecase;

pub use client::{ApiClient, ClientError};
pub use config::{Config, Endpoints};
pub use error::ValidationError;
pub use model::{
    Characteristic, City, Coordinates, GeoPoint, Location, RelativeHumidity, Temperature,
    TemperatureUnit, WeatherReport, WeatherRequest, WindSpeed,
};
pub use repository::{
    CitiesRepository, ForecastWeatherRepository, HistoricalWeatherRepository, LocationRepository,
    RepositoryError, RepositoryResult, WeatherRepository,
};
pub use usecase::{FetchForecastWeather, FetchHistoricalWeather, SearchCities};
