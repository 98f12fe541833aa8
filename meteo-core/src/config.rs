use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    client::{ARCHIVE_URL, ApiClient, FORECAST_URL, GEOCODING_URL},
    dto::LocationDto,
    model::City,
    repository::{CitiesRepository, ForecastWeatherRepository, HistoricalWeatherRepository},
};

/// Base URLs of the upstream APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub forecast: String,
    pub archive: String,
    pub geocoding: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: FORECAST_URL.to_string(),
            archive: ARCHIVE_URL.to_string(),
            geocoding: GEOCODING_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// timezone = "auto"
/// request_timeout_secs = 10
///
/// [default_city]
/// id = 2950159
/// name = "Berlin"
/// latitude = 52.52437
/// longitude = 13.41053
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Passed to the weather APIs; `auto` resolves to the location's own zone.
    pub timezone: String,
    pub request_timeout_secs: u64,
    /// Maximum number of geocoding hits per search.
    pub search_count: u8,
    pub endpoints: Endpoints,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_city: Option<LocationDto>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "auto".to_string(),
            request_timeout_secs: 10,
            search_count: 10,
            endpoints: Endpoints::default(),
            default_city: None,
        }
    }
}

impl Config {
    /// The saved default city, validated.
    pub fn default_city(&self) -> Result<City> {
        let dto = self.default_city.as_ref().ok_or_else(|| {
            anyhow!(
                "No default city configured.\n\
                 Hint: run `meteo configure`, or pass --city / --lat and --lon."
            )
        })?;

        City::from_dto(dto).context("Configured default city is invalid")
    }

    pub fn set_default_city(&mut self, city: &City) {
        self.default_city = Some(LocationDto::from(city));
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn client(&self, base_url: &str) -> Result<ApiClient> {
        ApiClient::new(base_url, self.request_timeout())
            .with_context(|| format!("Failed to build HTTP client for {base_url}"))
    }

    pub fn forecast_repository(&self) -> Result<ForecastWeatherRepository> {
        Ok(ForecastWeatherRepository::new(self.client(&self.endpoints.forecast)?, &self.timezone))
    }

    pub fn historical_repository(&self) -> Result<HistoricalWeatherRepository> {
        Ok(HistoricalWeatherRepository::new(self.client(&self.endpoints.archive)?, &self.timezone))
    }

    pub fn cities_repository(&self) -> Result<CitiesRepository> {
        Ok(CitiesRepository::new(self.client(&self.endpoints.geocoding)?, self.search_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoPoint;

    fn berlin() -> City {
        City::from_dto(&LocationDto {
            id: 2950159,
            name: Some("Berlin".into()),
            latitude: Some(52.52437.into()),
            longitude: Some(13.41053.into()),
            country: Some("Germany".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn default_city_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.default_city().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No default city configured"));
        assert!(msg.contains("Hint: run `meteo configure`"));
    }

    #[test]
    fn set_default_city_then_read_it_back() {
        let mut cfg = Config::default();
        cfg.set_default_city(&berlin());

        let city = cfg.default_city().expect("default city must exist");
        assert_eq!(city, berlin());
        assert_eq!(city.latitude(), 52.52437);
    }

    #[test]
    fn invalid_stored_city_is_reported() {
        let cfg = Config {
            default_city: Some(LocationDto { name: Some("X".into()), ..Default::default() }),
            ..Config::default()
        };
        let err = cfg.default_city().unwrap_err();
        assert!(format!("{err:#}").contains("Invalid LocationDTO"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg =
            Config { timezone: "Europe/Berlin".into(), search_count: 5, ..Config::default() };
        cfg.set_default_city(&berlin());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.default_city().unwrap().name(), "Berlin");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let contents = "timezone = \"UTC\"\n[endpoints]\nforecast = \"http://localhost:1234\"\n";
        fs::write(&path, contents).unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timezone, "UTC");
        assert_eq!(cfg.endpoints.forecast, "http://localhost:1234");
        assert_eq!(cfg.endpoints.archive, ARCHIVE_URL);
        assert_eq!(cfg.request_timeout_secs, 10);
    }

    #[test]
    fn repositories_build_from_defaults() {
        let cfg = Config::default();
        assert!(cfg.forecast_repository().is_ok());
        assert!(cfg.historical_repository().is_ok());
        assert!(cfg.cities_repository().is_ok());
    }
}
