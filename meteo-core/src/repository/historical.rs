use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};

use crate::{
    client::ApiClient,
    dto::HourlyResponseDto,
    model::{WeatherReport, WeatherRequest},
    time::parse_date,
};

use super::{
    HOURLY_VARIABLES, RepositoryError, RepositoryResult, WeatherRepository, check_coordinates,
};

const GENERIC_ERROR: &str = "An error occurred while fetching historical weather data";

/// The archive lags behind real time; these bound the default window.
pub const DEFAULT_START_OFFSET_DAYS: u64 = 7;
pub const DEFAULT_END_OFFSET_DAYS: u64 = 2;

/// Past hourly weather from the archive endpoint.
#[derive(Debug, Clone)]
pub struct HistoricalWeatherRepository {
    client: ApiClient,
    timezone: String,
}

impl HistoricalWeatherRepository {
    pub fn new(client: ApiClient, timezone: impl Into<String>) -> Self {
        Self { client, timezone: timezone.into() }
    }
}

/// Resolve the requested range, filling gaps with the default window ending `today`.
///
/// A missing start follows a given end, so only user-supplied dates can be inverted.
pub fn resolve_range(
    request: &WeatherRequest,
    today: NaiveDate,
) -> RepositoryResult<(NaiveDate, NaiveDate)> {
    let start = match request.start_date.as_deref() {
        Some(raw) => Some(parse_date(raw).ok_or_else(|| invalid("Invalid start date"))?),
        None => None,
    };
    let end = match request.end_date.as_deref() {
        Some(raw) => Some(parse_date(raw).ok_or_else(|| invalid("Invalid end date"))?),
        None => None,
    };

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => (start, today - Days::new(DEFAULT_END_OFFSET_DAYS)),
        (None, Some(end)) => {
            (end - Days::new(DEFAULT_START_OFFSET_DAYS - DEFAULT_END_OFFSET_DAYS), end)
        }
        (None, None) => (
            today - Days::new(DEFAULT_START_OFFSET_DAYS),
            today - Days::new(DEFAULT_END_OFFSET_DAYS),
        ),
    };

    if start > end {
        return Err(invalid("Start date cannot be after end date"));
    }

    Ok((start, end))
}

fn invalid(message: &str) -> RepositoryError {
    RepositoryError::invalid_input(message)
}

#[async_trait]
impl WeatherRepository for HistoricalWeatherRepository {
    async fn get_weather(&self, request: &WeatherRequest) -> RepositoryResult<WeatherReport> {
        check_coordinates(request)?;
        let (start, end) = resolve_range(request, Local::now().date_naive())?;

        let query = [
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("timezone", self.timezone.clone()),
            ("start_date", start.format("%Y-%m-%d").to_string()),
            ("end_date", end.format("%Y-%m-%d").to_string()),
        ];

        let response: HourlyResponseDto = self
            .client
            .get_json(&query)
            .await
            .map_err(|e| RepositoryError::from_client(e, GENERIC_ERROR))?;

        WeatherReport::from_series_payload(response.hourly, response.hourly_units)
            .map_err(RepositoryError::rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 10).unwrap()
    }

    fn request(start: Option<&str>, end: Option<&str>) -> WeatherRequest {
        WeatherRequest {
            latitude: 10.0,
            longitude: 20.0,
            start_date: start.map(str::to_string),
            end_date: end.map(str::to_string),
        }
    }

    #[test]
    fn explicit_range_is_kept() {
        let (start, end) =
            resolve_range(&request(Some("2023-01-01"), Some("2023-01-02")), today()).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    }

    #[test]
    fn single_day_range_is_allowed() {
        assert!(resolve_range(&request(Some("2023-01-01"), Some("2023-01-01")), today()).is_ok());
    }

    #[test]
    fn missing_dates_use_default_window() {
        let (start, end) = resolve_range(&request(None, None), today()).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 1, 8).unwrap());
    }

    #[test]
    fn missing_start_follows_given_end() {
        let (start, end) = resolve_range(&request(None, Some("2020-01-01")), today()).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2019, 12, 27).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn given_start_with_default_end() {
        let (start, end) = resolve_range(&request(Some("2023-01-05"), None), today()).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 1, 8).unwrap());
    }

    #[test]
    fn invalid_dates_are_reported() {
        let err = resolve_range(&request(Some("invalid-date"), None), today()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid start date");

        let err =
            resolve_range(&request(Some("2023-01-01"), Some("invalid-date")), today()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid end date");
    }

    #[test]
    fn start_is_checked_before_end() {
        let err = resolve_range(&request(Some("bad"), Some("worse")), today()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid start date");
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err =
            resolve_range(&request(Some("2023-01-02"), Some("2023-01-01")), today()).unwrap_err();
        assert_eq!(
            err,
            RepositoryError::InvalidInput("Start date cannot be after end date".into())
        );
    }
}
