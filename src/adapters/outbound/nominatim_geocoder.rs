//! Nominatim Reverse Geocoder
//!
//! Implements ReverseGeocoder using the Nominatim HTTP API
//! (OpenStreetMap's geocoding service, or any self-hosted instance).
//!
//! See: https://nominatim.org/release-docs/latest/api/Reverse/

use crate::domain::entities::{AddressCandidate, Coordinate};
use crate::domain::ports::ReverseGeocoder;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Message Nominatim sends when nothing is near the coordinate.
const UNABLE_TO_GEOCODE: &str = "Unable to geocode";

/// Building-level detail.
const ZOOM_BUILDING: &str = "18";

/// Response from Nominatim's reverse API (`format=jsonv2`).
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

/// Configuration for the Nominatim connection.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL of the Nominatim instance (e.g., "https://nominatim.openstreetmap.org")
    pub base_url: String,
    /// User-Agent sent with every request; the public instance requires one
    pub user_agent: String,
    /// Preferred result language (`accept-language`)
    pub language: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("geo-address/{}", env!("CARGO_PKG_VERSION")),
            language: None,
            timeout_secs: 15,
        }
    }
}

/// Nominatim-backed reverse geocoder.
pub struct NominatimGeocoder {
    config: NominatimConfig,
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Create a new geocoder with the given configuration.
    pub fn new(config: NominatimConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Fetch the single best match for a coordinate.
    async fn fetch_reverse(&self, coordinate: Coordinate) -> anyhow::Result<Option<String>> {
        let url = format!("{}/reverse", self.config.base_url.trim_end_matches('/'));

        let mut query = vec![
            ("format", "jsonv2".to_string()),
            ("lat", coordinate.latitude.to_string()),
            ("lon", coordinate.longitude.to_string()),
            ("zoom", ZOOM_BUILDING.to_string()),
            ("addressdetails", "0".to_string()),
        ];
        if let Some(language) = &self.config.language {
            query.push(("accept-language", language.clone()));
        }

        let response = self.client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Nominatim reverse failed: {} - {}", status, body);
        }

        let data: ReverseResponse = response.json().await?;
        Self::parse_reverse(data)
    }

    /// Turn a reverse response into the display name, if any.
    fn parse_reverse(response: ReverseResponse) -> anyhow::Result<Option<String>> {
        match response.error {
            Some(error) if error == UNABLE_TO_GEOCODE => Ok(None),
            Some(error) => anyhow::bail!("Nominatim error: {}", error),
            None => Ok(response
                .display_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
        max_results: usize,
    ) -> anyhow::Result<Vec<AddressCandidate>> {
        if max_results == 0 {
            return Ok(Vec::new());
        }

        // The reverse endpoint only ever returns the closest object.
        let found = self.fetch_reverse(coordinate).await?;
        tracing::debug!("nominatim reverse {} -> {:?}", coordinate, found);

        Ok(found.into_iter().map(AddressCandidate::new).collect())
    }
}
