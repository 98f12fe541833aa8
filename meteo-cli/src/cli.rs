use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{Select, Text};
use meteo_core::{
    City, Config, Coordinates, FetchForecastWeather, FetchHistoricalWeather, GeoPoint, SearchCities,
};

use crate::output;

/// Searches shorter than this are not sent upstream.
const MIN_QUERY_LEN: usize = 3;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "City weather from Open-Meteo")]
pub struct Cli {
    /// Log requests and responses to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for cities by name.
    Search {
        query: String,
    },

    /// Show the hourly forecast.
    Forecast {
        #[command(flatten)]
        place: PlaceArgs,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show past hourly weather.
    History {
        #[command(flatten)]
        place: PlaceArgs,

        /// First day, YYYY-MM-DD. Defaults to a week ago.
        #[arg(long)]
        start: Option<String>,

        /// Last day, YYYY-MM-DD. Defaults to two days ago.
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Pick a default city interactively.
    Configure,
}

/// Where to get weather for. Falls back to the configured default city.
#[derive(Debug, Args)]
pub struct PlaceArgs {
    /// City name; the first search hit is used.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    city: Option<String>,

    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Search { query } => {
                let cities = search(&config, &query).await?;
                output::print_cities(&cities);
            }
            Command::Forecast { place, json } => {
                let city = resolve_place(&config, &place).await?;
                let use_case = FetchForecastWeather::new(Arc::new(config.forecast_repository()?));
                let report = use_case
                    .execute(city.latitude(), city.longitude())
                    .await
                    .context("Could not fetch the forecast")?;
                output::print_report(&city, &report, json)?;
            }
            Command::History { place, start, end, json } => {
                let city = resolve_place(&config, &place).await?;
                let repository = Arc::new(config.historical_repository()?);
                let use_case = FetchHistoricalWeather::new(repository);
                let report = use_case
                    .execute(city.latitude(), city.longitude(), start, end)
                    .await
                    .context("Could not fetch historical weather")?;
                output::print_report(&city, &report, json)?;
            }
            Command::Configure => configure(config).await?,
        }

        Ok(())
    }
}

async fn search(config: &Config, query: &str) -> Result<Vec<City>> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        bail!("Search query must be at least {MIN_QUERY_LEN} characters long");
    }

    let use_case = SearchCities::new(Arc::new(config.cities_repository()?));
    use_case
        .execute(query)
        .await
        .with_context(|| format!("City search for '{query}' failed"))
}

async fn resolve_place(config: &Config, place: &PlaceArgs) -> Result<City> {
    match (place.lat, place.lon, place.city.as_deref()) {
        (Some(latitude), Some(longitude), _) => {
            let coords = Coordinates { latitude, longitude, elevation: None };
            Ok(City::from_location(&coords)?)
        }
        (_, _, Some(name)) => {
            let city = search(config, name)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("No city found matching '{name}'"))?;
            tracing::debug!(city = %city.display_name(), "using first search hit");
            Ok(city)
        }
        _ => config.default_city(),
    }
}

async fn configure(mut config: Config) -> Result<()> {
    let query = Text::new("City to use by default:")
        .with_help_message("At least three characters, e.g. \"Berlin\"")
        .prompt()
        .context("Failed to read city name")?;

    let cities = search(&config, &query).await?;
    if cities.is_empty() {
        bail!("No city found matching '{query}'");
    }

    let options: Vec<String> = cities.iter().map(output::describe_city).collect();
    let picked = Select::new("Which one?", options)
        .raw_prompt()
        .context("Failed to read selection")?;
    let city = &cities[picked.index];

    config.set_default_city(city);
    config.save()?;

    println!(
        "Default city set to {}. Saved to {}",
        city.display_name(),
        Config::config_file_path()?.display()
    );
    Ok(())
}
