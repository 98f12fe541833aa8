//! Validated domain objects built from raw DTOs.

pub mod location;
pub mod measurement;
pub mod report;

pub use location::{City, Coordinates, GeoPoint, Location};
pub use measurement::{
    Measurement, MeasurementKind, RelativeHumidity, RelativeHumidityKind, Temperature,
    TemperatureKind, TemperatureUnit, WindSpeed, WindSpeedKind,
};
pub use report::{Characteristic, WeatherReport};

use serde::{Deserialize, Serialize};

/// What a weather repository is asked for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// `YYYY-MM-DD`; only the historical repository uses it.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
