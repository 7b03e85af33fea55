use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::Config,
    error::LookupError,
    geocode::Geocoder,
    http::get_json,
    local_time::describe_local_time,
    model::{GeoResult, Report, ToolKind, WeatherSample},
};

use super::WeatherTimeProvider;

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoder: Geocoder,
    http: Client,
    forecast_endpoint: String,
    timeout: Duration,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let timeout = config.timeout();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            geocoder: Geocoder::new(
                http.clone(),
                &config.geocoding_endpoint,
                &config.country_code,
                timeout,
            ),
            http,
            forecast_endpoint: config.forecast_endpoint.clone(),
            timeout,
        })
    }

    async fn fetch_current(&self, city: &str, geo: &GeoResult) -> Result<WeatherSample, LookupError> {
        let query = [
            ("latitude", geo.latitude.to_string()),
            ("longitude", geo.longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("temperature_unit", "fahrenheit".to_string()),
        ];

        let parsed: OmForecastResponse =
            get_json(&self.http, &self.forecast_endpoint, &query, self.timeout).await?;

        let current = parsed.current_weather.unwrap_or_default();
        let temperature_f = current.temperature.ok_or_else(|| LookupError::DataUnavailable {
            city: city.to_string(),
        })?;

        Ok(WeatherSample::from_fahrenheit(temperature_f, current.weathercode))
    }

    async fn weather_report(&self, city: &str) -> Result<String, LookupError> {
        let geo = self.geocoder.resolve(city).await?;
        let sample = self.fetch_current(city, &geo).await?;

        Ok(sample.describe(&geo.resolved_name))
    }

    async fn time_report(&self, city: &str) -> Result<String, LookupError> {
        let geo = self.geocoder.resolve(city).await?;
        let timezone_id = geo
            .timezone_id
            .as_deref()
            .ok_or_else(|| LookupError::MissingTimezone {
                resolved_name: geo.resolved_name.clone(),
            })?;

        describe_local_time(&geo.resolved_name, timezone_id, Utc::now())
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: Option<OmCurrentWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct OmCurrentWeather {
    temperature: Option<f64>,
    weathercode: Option<i64>,
}

#[async_trait]
impl WeatherTimeProvider for OpenMeteoProvider {
    async fn get_weather(&self, city: &str) -> Report {
        collapse(self.weather_report(city).await, ToolKind::Weather, city)
    }

    async fn get_current_time(&self, city: &str) -> Report {
        collapse(self.time_report(city).await, ToolKind::CurrentTime, city)
    }
}

fn collapse(result: Result<String, LookupError>, tool: ToolKind, city: &str) -> Report {
    match result {
        Ok(text) => Report::success(text),
        Err(err) => {
            tracing::warn!(%tool, city, error = %err, "tool call failed");
            err.into_report(tool, city)
        }
    }
}
