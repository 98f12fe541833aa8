use serde::Serialize;

use crate::{
    dto::{LocationDto, RawNumber},
    error::ValidationError,
};

/// Anything that can be placed on the map.
pub trait GeoPoint {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
    fn elevation(&self) -> Option<f64>;
}

/// Unvalidated coordinates, e.g. typed by the user or read from a device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
}

impl GeoPoint for Coordinates {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn elevation(&self) -> Option<f64> {
        self.elevation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    elevation: Option<f64>,
}

impl Location {
    pub fn from_dto(dto: &LocationDto) -> Result<Self, ValidationError> {
        let (latitude, longitude, elevation) = validate_position(
            dto.latitude.as_ref(),
            dto.longitude.as_ref(),
            dto.elevation.as_ref(),
        )?;

        Ok(Self { latitude, longitude, elevation })
    }
}

impl GeoPoint for Location {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn elevation(&self) -> Option<f64> {
        self.elevation
    }
}

/// A named place from geocoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    id: u64,
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elevation: Option<f64>,
}

impl City {
    pub const UNKNOWN_NAME: &'static str = "Unknown";

    pub fn from_dto(dto: &LocationDto) -> Result<Self, ValidationError> {
        let (latitude, longitude, elevation) = validate_position(
            dto.latitude.as_ref(),
            dto.longitude.as_ref(),
            dto.elevation.as_ref(),
        )?;

        let name = dto
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::Name)?;

        Ok(Self {
            id: dto.id,
            name: name.to_string(),
            latitude,
            longitude,
            country: dto.country.clone(),
            country_code: dto.country_code.clone(),
            elevation,
        })
    }

    /// Placeholder city for a bare position, when only coordinates are known.
    pub fn from_location(location: &impl GeoPoint) -> Result<Self, ValidationError> {
        let latitude = RawNumber::from(location.latitude());
        let longitude = RawNumber::from(location.longitude());
        let elevation = location.elevation().map(RawNumber::from);
        let (latitude, longitude, elevation) =
            validate_position(Some(&latitude), Some(&longitude), elevation.as_ref())?;

        Ok(Self {
            id: 0,
            name: Self::UNKNOWN_NAME.to_string(),
            latitude,
            longitude,
            country: None,
            country_code: None,
            elevation,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    /// "Name, Country" when the country is known.
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

impl GeoPoint for City {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn elevation(&self) -> Option<f64> {
        self.elevation
    }
}

impl From<&City> for LocationDto {
    fn from(city: &City) -> Self {
        LocationDto {
            id: city.id,
            name: Some(city.name.clone()),
            latitude: Some(city.latitude.into()),
            longitude: Some(city.longitude.into()),
            elevation: city.elevation.map(Into::into),
            country: city.country.clone(),
            country_code: city.country_code.clone(),
            timezone: None,
        }
    }
}

fn validate_position(
    latitude: Option<&RawNumber>,
    longitude: Option<&RawNumber>,
    elevation: Option<&RawNumber>,
) -> Result<(f64, f64, Option<f64>), ValidationError> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(ValidationError::Malformed("LocationDTO"));
    };

    let finite = |raw: &RawNumber| raw.as_f64().filter(|v| !v.is_nan());
    let (Some(latitude), Some(longitude)) = (finite(latitude), finite(longitude)) else {
        return Err(ValidationError::Coordinates);
    };

    let elevation = match elevation {
        Some(raw) => Some(finite(raw).ok_or(ValidationError::Elevation)?),
        None => None,
    };

    Ok((latitude, longitude, elevation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_dto() -> LocationDto {
        LocationDto {
            id: 1,
            name: Some("Test City".into()),
            latitude: Some(40.7128.into()),
            longitude: Some((-74.006).into()),
            elevation: Some(10.0.into()),
            country: Some("Test Country".into()),
            country_code: Some("TC".into()),
            timezone: Some("UTC".into()),
        }
    }

    #[test]
    fn location_from_valid_dto() {
        let location = Location::from_dto(&city_dto()).unwrap();
        assert_eq!(location.latitude(), 40.7128);
        assert_eq!(location.longitude(), -74.006);
        assert_eq!(location.elevation(), Some(10.0));
    }

    #[test]
    fn location_elevation_is_optional() {
        let dto = LocationDto { elevation: None, ..city_dto() };
        assert_eq!(Location::from_dto(&dto).unwrap().elevation(), None);
    }

    #[test]
    fn location_rejects_missing_coordinates() {
        let dto = LocationDto { longitude: None, ..city_dto() };
        assert_eq!(Location::from_dto(&dto).unwrap_err().to_string(), "Invalid LocationDTO");
    }

    #[test]
    fn location_rejects_non_numeric_latitude() {
        let dto = LocationDto { latitude: Some("invalid".into()), ..city_dto() };
        assert_eq!(
            Location::from_dto(&dto).unwrap_err().to_string(),
            "Invalid latitude or longitude"
        );
    }

    #[test]
    fn location_rejects_bad_elevation() {
        let dto = LocationDto { elevation: Some("high".into()), ..city_dto() };
        assert_eq!(Location::from_dto(&dto).unwrap_err(), ValidationError::Elevation);
    }

    #[test]
    fn zero_coordinates_are_valid() {
        let dto =
            LocationDto { latitude: Some(0.0.into()), longitude: Some(0.0.into()), ..city_dto() };
        let location = Location::from_dto(&dto).unwrap();
        assert_eq!((location.latitude(), location.longitude()), (0.0, 0.0));
    }

    #[test]
    fn city_from_valid_dto() {
        let city = City::from_dto(&city_dto()).unwrap();

        assert_eq!(city.id(), 1);
        assert_eq!(city.name(), "Test City");
        assert_eq!(city.latitude(), 40.7128);
        assert_eq!(city.longitude(), -74.006);
        assert_eq!(city.country(), Some("Test Country"));
        assert_eq!(city.country_code(), Some("TC"));
        assert_eq!(city.elevation(), Some(10.0));
        assert_eq!(city.display_name(), "Test City, Test Country");
    }

    #[test]
    fn city_rejects_empty_name() {
        let dto = LocationDto { name: Some(String::new()), ..city_dto() };
        assert_eq!(City::from_dto(&dto).unwrap_err().to_string(), "Invalid name");

        let dto = LocationDto { name: None, ..city_dto() };
        assert_eq!(City::from_dto(&dto).unwrap_err(), ValidationError::Name);
    }

    #[test]
    fn city_checks_coordinates_before_name() {
        let dto = LocationDto { name: None, latitude: Some("x".into()), ..city_dto() };
        assert_eq!(City::from_dto(&dto).unwrap_err(), ValidationError::Coordinates);
    }

    #[test]
    fn city_from_location_is_a_placeholder() {
        let coords = Coordinates { latitude: 40.7128, longitude: -74.006, elevation: Some(10.0) };
        let city = City::from_location(&coords).unwrap();

        assert_eq!(city.id(), 0);
        assert_eq!(city.name(), "Unknown");
        assert_eq!(city.latitude(), 40.7128);
        assert_eq!(city.elevation(), Some(10.0));
        assert_eq!(city.country(), None);
        assert_eq!(city.display_name(), "Unknown");
    }

    #[test]
    fn city_from_location_validates_numbers() {
        let coords = Coordinates { latitude: f64::NAN, longitude: -74.006, elevation: Some(10.0) };
        assert_eq!(
            City::from_location(&coords).unwrap_err().to_string(),
            "Invalid latitude or longitude"
        );

        let coords =
            Coordinates { latitude: 40.7128, longitude: -74.006, elevation: Some(f64::NAN) };
        assert_eq!(City::from_location(&coords).unwrap_err().to_string(), "Invalid elevation");
    }

    #[test]
    fn city_round_trips_through_dto() {
        let city = City::from_dto(&city_dto()).unwrap();
        let dto = LocationDto::from(&city);
        assert_eq!(City::from_dto(&dto).unwrap(), city);
    }
}
