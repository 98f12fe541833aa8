//! Application entry points. Each one delegates to a repository unchanged.

use std::sync::Arc;

use crate::{
    model::{City, WeatherReport, WeatherRequest},
    repository::{LocationRepository, RepositoryResult, WeatherRepository},
};

#[derive(Debug, Clone)]
pub struct FetchForecastWeather {
    repository: Arc<dyn WeatherRepository>,
}

impl FetchForecastWeather {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, latitude: f64, longitude: f64) -> RepositoryResult<WeatherReport> {
        let request = WeatherRequest { latitude, longitude, ..Default::default() };
        self.repository.get_weather(&request).await
    }
}

#[derive(Debug, Clone)]
pub struct FetchHistoricalWeather {
    repository: Arc<dyn WeatherRepository>,
}

impl FetchHistoricalWeather {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> RepositoryResult<WeatherReport> {
        let request = WeatherRequest { latitude, longitude, start_date, end_date };
        self.repository.get_weather(&request).await
    }
}

#[derive(Debug, Clone)]
pub struct SearchCities {
    repository: Arc<dyn LocationRepository>,
}

impl SearchCities {
    pub fn new(repository: Arc<dyn LocationRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, query: &str) -> RepositoryResult<Vec<City>> {
        self.repository.search_locations(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dto::{LocationDto, UnitsDto, WeatherSeriesDto},
        repository::RepositoryError,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingWeather {
        seen: Mutex<Vec<WeatherRequest>>,
    }

    #[async_trait]
    impl WeatherRepository for RecordingWeather {
        async fn get_weather(&self, request: &WeatherRequest) -> RepositoryResult<WeatherReport> {
            self.seen.lock().unwrap().push(request.clone());
            let series = WeatherSeriesDto {
                time: Some(vec!["2023-01-01T00:00".into()]),
                temperature_2m: Some(vec![Some(1.0)]),
                ..Default::default()
            };
            let units = UnitsDto { temperature_2m: Some("°C".into()), ..Default::default() };
            Ok(WeatherReport::from_series_payload(Some(series), Some(units))?)
        }
    }

    #[derive(Debug)]
    struct FailingCities;

    #[async_trait]
    impl LocationRepository for FailingCities {
        async fn search_locations(&self, _query: &str) -> RepositoryResult<Vec<City>> {
            Err(RepositoryError::Transport("Network error".into()))
        }
    }

    #[derive(Debug)]
    struct OneCity;

    #[async_trait]
    impl LocationRepository for OneCity {
        async fn search_locations(&self, query: &str) -> RepositoryResult<Vec<City>> {
            let dto = LocationDto {
                id: 7,
                name: Some(query.to_string()),
                latitude: Some(1.0.into()),
                longitude: Some(2.0.into()),
                ..Default::default()
            };
            Ok(vec![City::from_dto(&dto)?])
        }
    }

    #[tokio::test]
    async fn forecast_passes_coordinates_through() {
        let repo = Arc::new(RecordingWeather::default());
        let use_case = FetchForecastWeather::new(repo.clone());

        let report = use_case.execute(52.52, 13.41).await.unwrap();
        assert_eq!(report.temperatures().unwrap().len(), 1);

        let seen = repo.seen.lock().unwrap();
        assert_eq!(seen[0].latitude, 52.52);
        assert_eq!(seen[0].longitude, 13.41);
        assert_eq!(seen[0].start_date, None);
    }

    #[tokio::test]
    async fn historical_passes_the_date_range() {
        let repo = Arc::new(RecordingWeather::default());
        let use_case = FetchHistoricalWeather::new(repo.clone());

        use_case
            .execute(1.0, 2.0, Some("2023-01-01".into()), Some("2023-01-02".into()))
            .await
            .unwrap();

        let seen = repo.seen.lock().unwrap();
        assert_eq!(seen[0].start_date.as_deref(), Some("2023-01-01"));
        assert_eq!(seen[0].end_date.as_deref(), Some("2023-01-02"));
    }

    #[tokio::test]
    async fn search_returns_repository_result_unchanged() {
        let ok = SearchCities::new(Arc::new(OneCity)).execute("Berlin").await.unwrap();
        assert_eq!(ok[0].name(), "Berlin");
        assert_eq!(ok[0].id(), 7);

        let err = SearchCities::new(Arc::new(FailingCities)).execute("Berlin").await.unwrap_err();
        assert_eq!(err.to_string(), "Network error");
    }
}
