use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use crate::{
    dto::{UnitsDto, WeatherSeriesDto},
    error::ValidationError,
    time::parse_timestamp,
};

use super::measurement::{Measurement, MeasurementKind, RelativeHumidity, Temperature, WindSpeed};

/// One non-empty characteristic of a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Characteristic<'a> {
    Temperature(&'a [Temperature]),
    RelativeHumidity(&'a [RelativeHumidity]),
    WindSpeed(&'a [WindSpeed]),
}

impl Characteristic<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Characteristic::Temperature(_) => "Temperature",
            Characteristic::RelativeHumidity(_) => "Relative humidity",
            Characteristic::WindSpeed(_) => "Wind speed",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Characteristic::Temperature(v) => v.len(),
            Characteristic::RelativeHumidity(v) => v.len(),
            Characteristic::WindSpeed(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value and unit label at `index`, if present.
    pub fn reading(&self, index: usize) -> Option<(f64, String)> {
        match self {
            Characteristic::Temperature(v) => {
                v.get(index).map(|m| (m.value(), m.units().to_string()))
            }
            Characteristic::RelativeHumidity(v) => {
                v.get(index).map(|m| (m.value(), m.units().clone()))
            }
            Characteristic::WindSpeed(v) => v.get(index).map(|m| (m.value(), m.units().clone())),
        }
    }
}

/// Hourly weather for one place, validated per characteristic on first access.
#[derive(Debug)]
pub struct WeatherReport {
    series: WeatherSeriesDto,
    units: UnitsDto,
    temperatures: OnceLock<Vec<Temperature>>,
    relative_humidity: OnceLock<Vec<RelativeHumidity>>,
    wind_speed: OnceLock<Vec<WindSpeed>>,
}

impl WeatherReport {
    /// Check the top-level shape only; individual readings are validated lazily.
    pub fn from_series_payload(
        series: Option<WeatherSeriesDto>,
        units: Option<UnitsDto>,
    ) -> Result<Self, ValidationError> {
        let series = series.ok_or(ValidationError::Malformed("WeatherDTO"))?;
        let units = units.ok_or(ValidationError::Malformed("WeatherUnitsDTO"))?;

        if series.time.as_ref().is_none_or(Vec::is_empty) {
            return Err(ValidationError::MissingTime);
        }

        if series.temperature_2m.is_none()
            && series.relative_humidity_2m.is_none()
            && series.wind_speed_10m.is_none()
        {
            return Err(ValidationError::NoSeries);
        }

        Ok(Self {
            series,
            units,
            temperatures: OnceLock::new(),
            relative_humidity: OnceLock::new(),
            wind_speed: OnceLock::new(),
        })
    }

    pub fn temperatures(&self) -> Result<&[Temperature], ValidationError> {
        self.materialize(&self.temperatures)
    }

    pub fn relative_humidity(&self) -> Result<&[RelativeHumidity], ValidationError> {
        self.materialize(&self.relative_humidity)
    }

    pub fn wind_speed(&self) -> Result<&[WindSpeed], ValidationError> {
        self.materialize(&self.wind_speed)
    }

    /// Non-empty characteristics, always in temperature, humidity, wind order.
    pub fn characteristics(&self) -> Result<Vec<Characteristic<'_>>, ValidationError> {
        let candidates = [
            Characteristic::Temperature(self.temperatures()?),
            Characteristic::RelativeHumidity(self.relative_humidity()?),
            Characteristic::WindSpeed(self.wind_speed()?),
        ];

        Ok(candidates.into_iter().filter(|c| !c.is_empty()).collect())
    }

    /// Parsed `time` entries. Reparsed on every call.
    pub fn days(&self) -> Result<Vec<DateTime<Utc>>, ValidationError> {
        self.series
            .time
            .iter()
            .flatten()
            .map(|t| parse_timestamp(t).ok_or(ValidationError::Date))
            .collect()
    }

    pub fn series(&self) -> &WeatherSeriesDto {
        &self.series
    }

    // An absent series yields an empty collection; a present one must validate fully.
    fn materialize<'a, K: MeasurementKind>(
        &'a self,
        cell: &'a OnceLock<Vec<Measurement<K>>>,
    ) -> Result<&'a [Measurement<K>], ValidationError> {
        if let Some(cached) = cell.get() {
            return Ok(cached.as_slice());
        }

        let built = if K::series(&self.series).is_some() {
            Measurement::<K>::from_series(&self.series, &self.units)?
        } else {
            Vec::new()
        };

        Ok(cell.get_or_init(|| built).as_slice())
    }
}
