use std::{fmt, marker::PhantomData};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::{
    dto::{MeasurementDto, UnitsDto, WeatherSeriesDto},
    error::ValidationError,
    time::parse_timestamp,
};

/// The per-characteristic rules a [`Measurement`] is validated against.
pub trait MeasurementKind {
    type Unit: Clone + fmt::Debug + fmt::Display + PartialEq + Serialize;

    /// DTO name used in "missing field" errors, e.g. `TemperatureDTO`.
    const DTO_NAME: &'static str;
    /// Key of the series in the hourly payload, e.g. `temperature_2m`.
    const SERIES_KEY: &'static str;

    fn series(payload: &WeatherSeriesDto) -> Option<&[Option<f64>]>;
    fn unit_label(units: &UnitsDto) -> Option<&str>;
    fn parse_unit(label: &str) -> Result<Self::Unit, ValidationError>;
}

/// A single validated reading: a finite value, its unit and when it applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<K: MeasurementKind> {
    value: f64,
    units: K::Unit,
    date: DateTime<Utc>,
    kind: PhantomData<K>,
}

impl<K: MeasurementKind> Measurement<K> {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> &K::Unit {
        &self.units
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Validate a single raw reading.
    pub fn from_single(dto: &MeasurementDto) -> Result<Self, ValidationError> {
        let (Some(value), Some(units), Some(date)) = (
            dto.value.as_ref(),
            dto.units.as_deref().filter(|u| !u.is_empty()),
            dto.date.as_deref().filter(|d| !d.is_empty()),
        ) else {
            return Err(ValidationError::Malformed(K::DTO_NAME));
        };

        let value = value.as_f64().filter(|v| v.is_finite()).ok_or(ValidationError::Value)?;
        let units = K::parse_unit(units)?;
        let date = parse_timestamp(date).ok_or(ValidationError::Date)?;

        Ok(Self { value, units, date, kind: PhantomData })
    }

    /// Re-validate another measurement and copy it into this kind.
    pub fn from_existing<O: MeasurementKind>(
        other: &Measurement<O>,
    ) -> Result<Self, ValidationError> {
        Self::from_single(&MeasurementDto::new(
            other.value,
            other.units.to_string(),
            other.date.to_rfc3339(),
        ))
    }

    /// Validate every entry of this kind's series, pairing each with `time` at the same index.
    ///
    /// Fails as a whole on the first bad entry.
    pub fn from_series(
        payload: &WeatherSeriesDto,
        units: &UnitsDto,
    ) -> Result<Vec<Self>, ValidationError> {
        let unit = K::unit_label(units).filter(|u| !u.is_empty());
        let (Some(series), Some(unit)) = (K::series(payload), unit) else {
            return Err(ValidationError::Malformed("WeatherDTO"));
        };

        let time = payload.time.as_deref().unwrap_or_default();
        if series.len() != time.len() {
            return Err(ValidationError::SeriesLength {
                series: K::SERIES_KEY,
                expected: time.len(),
                actual: series.len(),
            });
        }

        series
            .iter()
            .zip(time)
            .map(|(value, date)| {
                Self::from_single(&MeasurementDto {
                    value: value.map(Into::into),
                    units: Some(unit.to_string()),
                    date: Some(date.clone()),
                })
            })
            .collect()
    }
}

impl<K: MeasurementKind> Serialize for Measurement<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Measurement", 3)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("units", &self.units)?;
        state.serialize_field("date", &self.date)?;
        state.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TemperatureUnit {
    #[serde(rename = "°C")]
    Celsius,
    #[serde(rename = "°F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeHumidityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindSpeedKind;

impl MeasurementKind for TemperatureKind {
    type Unit = TemperatureUnit;

    const DTO_NAME: &'static str = "TemperatureDTO";
    const SERIES_KEY: &'static str = "temperature_2m";

    fn series(payload: &WeatherSeriesDto) -> Option<&[Option<f64>]> {
        payload.temperature_2m.as_deref()
    }

    fn unit_label(units: &UnitsDto) -> Option<&str> {
        units.temperature_2m.as_deref()
    }

    fn parse_unit(label: &str) -> Result<TemperatureUnit, ValidationError> {
        match label {
            "°C" => Ok(TemperatureUnit::Celsius),
            "°F" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(ValidationError::Units),
        }
    }
}

impl MeasurementKind for RelativeHumidityKind {
    type Unit = String;

    const DTO_NAME: &'static str = "RelativeHumidityDTO";
    const SERIES_KEY: &'static str = "relative_humidity_2m";

    fn series(payload: &WeatherSeriesDto) -> Option<&[Option<f64>]> {
        payload.relative_humidity_2m.as_deref()
    }

    fn unit_label(units: &UnitsDto) -> Option<&str> {
        units.relative_humidity_2m.as_deref()
    }

    fn parse_unit(label: &str) -> Result<String, ValidationError> {
        Ok(label.to_string())
    }
}

impl MeasurementKind for WindSpeedKind {
    type Unit = String;

    const DTO_NAME: &'static str = "WindSpeedDTO";
    const SERIES_KEY: &'static str = "wind_speed_10m";

    fn series(payload: &WeatherSeriesDto) -> Option<&[Option<f64>]> {
        payload.wind_speed_10m.as_deref()
    }

    fn unit_label(units: &UnitsDto) -> Option<&str> {
        units.wind_speed_10m.as_deref()
    }

    fn parse_unit(label: &str) -> Result<String, ValidationError> {
        Ok(label.to_string())
    }
}

pub type Temperature = Measurement<TemperatureKind>;
pub type RelativeHumidity = Measurement<RelativeHumidityKind>;
pub type WindSpeed = Measurement<WindSpeedKind>;
