use async_trait::async_trait;

use crate::{
    client::ApiClient,
    dto::HourlyResponseDto,
    model::{WeatherReport, WeatherRequest},
};

use super::{
    HOURLY_VARIABLES, RepositoryError, RepositoryResult, WeatherRepository, check_coordinates,
};

const GENERIC_ERROR: &str = "An error occurred while fetching weather data";

/// Upcoming hourly weather from the forecast endpoint.
#[derive(Debug, Clone)]
pub struct ForecastWeatherRepository {
    client: ApiClient,
    timezone: String,
}

impl ForecastWeatherRepository {
    pub fn new(client: ApiClient, timezone: impl Into<String>) -> Self {
        Self { client, timezone: timezone.into() }
    }
}

#[async_trait]
impl WeatherRepository for ForecastWeatherRepository {
    async fn get_weather(&self, request: &WeatherRequest) -> RepositoryResult<WeatherReport> {
        check_coordinates(request)?;

        let query = [
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("timezone", self.timezone.clone()),
        ];

        let response: HourlyResponseDto = self
            .client
            .get_json(&query)
            .await
            .map_err(|e| RepositoryError::from_client(e, GENERIC_ERROR))?;

        let report = WeatherReport::from_series_payload(response.hourly, response.hourly_units)
            .map_err(RepositoryError::rejected)?;
        let hours = report.series().time.as_ref().map_or(0, Vec::len);
        tracing::debug!(hours, "forecast received");

        Ok(report)
    }
}
