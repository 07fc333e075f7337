//! MaxMind Location Provider
//!
//! Implements LocationProvider using MaxMind GeoLite2-City.
//! The machine's public IP is looked up with an echo service and resolved
//! to the city-level position recorded in the database.

use crate::domain::entities::Coordinate;
use crate::domain::ports::LocationProvider;
use async_trait::async_trait;
use maxminddb::{MaxMindDBError, Reader};
use serde::Deserialize;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// MaxMind GeoIP location provider.
pub struct MaxMindLocationProvider {
    reader: Arc<Reader<Vec<u8>>>,
    client: reqwest::Client,
    public_ip_url: String,
}

impl MaxMindLocationProvider {
    /// Load a GeoLite2-City database from a file path.
    pub fn from_file(path: &str, public_ip_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let reader = Reader::open_readfile(path)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            reader: Arc::new(reader),
            client,
            public_ip_url: public_ip_url.to_string(),
        })
    }

    /// Fetch the public IP from a plain-text echo service.
    async fn fetch_public_ip(client: &reqwest::Client, url: &str) -> anyhow::Result<IpAddr> {
        let response = client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("public IP lookup failed: {}", response.status());
        }

        let text = response.text().await?;
        let ip = text
            .trim()
            .parse::<IpAddr>()
            .map_err(|e| anyhow::anyhow!("invalid public IP {:?}: {}", text.trim(), e))?;
        tracing::debug!("public IP detected: {}", ip);
        Ok(ip)
    }

    /// Resolve an IP to the position stored for it.
    fn locate(&self, ip: IpAddr) -> anyhow::Result<Option<Coordinate>> {
        #[derive(Debug, Deserialize)]
        struct Location {
            latitude: Option<f64>,
            longitude: Option<f64>,
        }

        #[derive(Debug, Deserialize)]
        struct CityResp {
            location: Option<Location>,
        }

        let resp: CityResp = match self.reader.lookup(ip) {
            Ok(resp) => resp,
            Err(MaxMindDBError::AddressNotFoundError(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(resp
            .location
            .and_then(|l| Some(Coordinate::new(l.latitude?, l.longitude?))))
    }
}

#[async_trait]
impl LocationProvider for MaxMindLocationProvider {
    async fn last_known_location(&self) -> anyhow::Result<Option<Coordinate>> {
        let ip = Self::fetch_public_ip(&self.client, &self.public_ip_url).await?;
        self.locate(ip)
    }
}
