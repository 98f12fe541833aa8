use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use meteo_core::{City, GeoPoint, WeatherReport};
use serde_json::json;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn describe_city(city: &City) -> String {
    let mut line = city.display_name();
    if let Some(code) = city.country_code() {
        line.push_str(&format!(" [{code}]"));
    }
    line.push_str(&format!(" ({:.4}, {:.4})", city.latitude(), city.longitude()));
    if let Some(elevation) = city.elevation() {
        line.push_str(&format!(", {elevation:.0} m"));
    }
    line
}

pub fn print_cities(cities: &[City]) {
    if cities.is_empty() {
        println!("No cities found.");
        return;
    }

    for (i, city) in cities.iter().enumerate() {
        println!("{:>2}. {}", i + 1, describe_city(city));
    }
}

pub fn print_report(city: &City, report: &WeatherReport, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", render_json(city, report)?);
    } else {
        print!("{}", render_table(city, report)?);
    }
    Ok(())
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn render_json(city: &City, report: &WeatherReport) -> Result<String> {
    let doc = json!({
        "city": city,
        "days": report.days()?,
        "temperature": report.temperatures()?,
        "relative_humidity": report.relative_humidity()?,
        "wind_speed": report.wind_speed()?,
    });

    serde_json::to_string_pretty(&doc).context("Failed to serialize report")
}

fn render_table(city: &City, report: &WeatherReport) -> Result<String> {
    let days = report.days()?;
    let characteristics = report.characteristics()?;

    let mut out = format!("Weather for {}\n\n", describe_city(city));

    out.push_str(&format!("{:<16}", "Time"));
    for c in &characteristics {
        let unit = c.reading(0).map(|(_, unit)| unit).unwrap_or_default();
        out.push_str(&format!("  {:>24}", format!("{} ({unit})", c.label())));
    }
    out.push('\n');

    for (i, day) in days.iter().enumerate() {
        out.push_str(&format!("{:<16}", format_time(day)));
        for c in &characteristics {
            let cell = c
                .reading(i)
                .map(|(value, _)| format!("{value:.1}"))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!("  {cell:>24}"));
        }
        out.push('\n');
    }

    Ok(out)
}
