use thiserror::Error;

/// A raw DTO failed shape or value checks while being turned into a domain object.
const SERIES_KEYS: &str = "temperature_2m, relative_humidity_2m, wind_speed_10m";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty. Carries the DTO name, e.g. `TemperatureDTO`.
    #[error("Invalid {0}")]
    Malformed(&'static str),

    #[error("Invalid value")]
    Value,

    #[error("Invalid units")]
    Units,

    #[error("Invalid date")]
    Date,

    #[error("Invalid latitude or longitude")]
    Coordinates,

    #[error("Invalid elevation")]
    Elevation,

    #[error("Invalid name")]
    Name,

    #[error("Invalid WeatherDTO: time is required")]
    MissingTime,

    #[error("Invalid WeatherDTO: at least one of {} is required", SERIES_KEYS)]
    NoSeries,

    #[error("Invalid WeatherDTO: {series} has {actual} values but time has {expected}")]
    SeriesLength {
        series: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_upstream_wording() {
        assert_eq!(ValidationError::Malformed("LocationDTO").to_string(), "Invalid LocationDTO");
        assert_eq!(ValidationError::Coordinates.to_string(), "Invalid latitude or longitude");
        assert_eq!(
            ValidationError::MissingTime.to_string(),
            "Invalid WeatherDTO: time is required"
        );
    }

    #[test]
    fn series_length_names_the_series() {
        let err =
            ValidationError::SeriesLength { series: "wind_speed_10m", expected: 3, actual: 2 };
        assert_eq!(
            err.to_string(),
            "Invalid WeatherDTO: wind_speed_10m has 2 values but time has 3"
        );
    }
}
