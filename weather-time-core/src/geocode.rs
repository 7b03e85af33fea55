//! Forward geocoding: city name to coordinates and timezone.
//! Uses the Open-Meteo geocoding search, which needs no API key.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    http::get_json,
    model::GeoResult,
};

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    results: Option<Vec<OmCandidate>>,
}

#[derive(Debug, Deserialize)]
struct OmCandidate {
    name: String,
    latitude: f64,
    longitude: f64,
    timezone: Option<String>,
}

impl From<OmCandidate> for GeoResult {
    fn from(c: OmCandidate) -> Self {
        GeoResult {
            resolved_name: c.name,
            latitude: c.latitude,
            longitude: c.longitude,
            timezone_id: c.timezone,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    http: Client,
    endpoint: String,
    country_code: String,
    timeout: Duration,
}

impl Geocoder {
    pub fn new(
        http: Client,
        endpoint: impl Into<String>,
        country_code: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            country_code: country_code.into(),
            timeout,
        }
    }

    /// Resolve `city` to the first candidate the search service returns.
    pub async fn resolve(&self, city: &str) -> Result<GeoResult, LookupError> {
        let query = [
            ("name", city.to_string()),
            ("country", self.country_code.clone()),
            ("count", "1".to_string()),
        ];

        let parsed: OmSearchResponse =
            get_json(&self.http, &self.endpoint, &query, self.timeout).await?;

        let geo: GeoResult = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| LookupError::NotFound {
                city: city.to_string(),
            })?
            .into();

        tracing::debug!(
            city,
            resolved = %geo.resolved_name,
            latitude = geo.latitude,
            longitude = geo.longitude,
            timezone = ?geo.timezone_id,
            "resolved city"
        );
        Ok(geo)
    }
}
