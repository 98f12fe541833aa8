//! Raw payload shapes as the Open-Meteo APIs return them.
//!
//! Nothing here is validated. Domain types in [`crate::model`] are built from
//! these through their checking factories.

use serde::{Deserialize, Serialize};

/// A JSON field that is expected to be a number but may hold anything.
///
/// Keeping the non-numeric case lets validation report a precise error
/// instead of the whole document failing to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Other(serde_json::Value),
}

impl RawNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Number(v) => Some(*v),
            RawNumber::Other(_) => None,
        }
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Other(serde_json::Value::String(value.to_string()))
    }
}

/// One measurement before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementDto {
    pub value: Option<RawNumber>,
    pub units: Option<String>,
    pub date: Option<String>,
}

impl MeasurementDto {
    pub fn new(value: f64, units: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            value: Some(RawNumber::Number(value)),
            units: Some(units.into()),
            date: Some(date.into()),
        }
    }
}

/// Hourly series as returned under `hourly`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeriesDto {
    pub time: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_2m: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_humidity_2m: Option<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed_10m: Option<Vec<Option<f64>>>,
}

/// Unit labels as returned under `hourly_units`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitsDto {
    pub time: Option<String>,
    pub temperature_2m: Option<String>,
    pub relative_humidity_2m: Option<String>,
    pub wind_speed_10m: Option<String>,
}

/// Envelope of a forecast or archive response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyResponseDto {
    pub hourly: Option<WeatherSeriesDto>,
    pub hourly_units: Option<UnitsDto>,
}

/// One geocoding search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
    pub latitude: Option<RawNumber>,
    pub longitude: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<RawNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Envelope of a geocoding response. `results` is omitted when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponseDto {
    #[serde(default)]
    pub results: Vec<LocationDto>,
}
