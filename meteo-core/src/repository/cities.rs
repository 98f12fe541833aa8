use async_trait::async_trait;

use crate::{client::ApiClient, dto::GeocodingResponseDto, model::City};

use super::{LocationRepository, RepositoryError, RepositoryResult};

const GENERIC_ERROR: &str = "An error occurred while searching for locations";

/// City lookup through the geocoding endpoint.
#[derive(Debug, Clone)]
pub struct CitiesRepository {
    client: ApiClient,
    count: u8,
}

impl CitiesRepository {
    pub fn new(client: ApiClient, count: u8) -> Self {
        Self { client, count }
    }
}

#[async_trait]
impl LocationRepository for CitiesRepository {
    async fn search_locations(&self, query: &str) -> RepositoryResult<Vec<City>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RepositoryError::invalid_input("Query cannot be empty"));
        }

        let params = [
            ("name", query.to_string()),
            ("count", self.count.to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];

        let response: GeocodingResponseDto = self
            .client
            .get_json(&params)
            .await
            .map_err(|e| RepositoryError::from_client(e, GENERIC_ERROR))?;

        let cities = response
            .results
            .iter()
            .map(City::from_dto)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::rejected)?;

        tracing::debug!(query, found = cities.len(), "city search finished");
        Ok(cities)
    }
}
