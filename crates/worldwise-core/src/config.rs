// ── Runtime service configuration ──
//
// Describes *where* the collection and geocoding services live and how
// the map behaves when no position is known. Never touches disk: the CLI
// builds a `ServiceConfig` from the config file and hands it in.

use std::time::Duration;

use url::Url;
use worldwise_api::{CitiesClient, GeocodingClient, TransportConfig};

use crate::error::CoreError;
use crate::model::Position;
use crate::position::DEFAULT_MAP_POSITION;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_GEOCODING_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// Connection settings for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Cities collection root (e.g., `http://localhost:8000`).
    pub api_url: Url,
    /// Reverse-geocoding endpoint.
    pub geocoding_url: Url,
    /// Request timeout shared by both services.
    pub timeout: Duration,
    /// Where the map focuses when nothing else is known.
    pub default_map_position: Position,
    /// Position reported by the device geolocation capability, if any.
    pub device_position: Option<Position>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            geocoding_url: Url::parse(DEFAULT_GEOCODING_URL)
                .expect("default geocoding URL is valid"),
            timeout: Duration::from_secs(30),
            default_map_position: DEFAULT_MAP_POSITION,
            device_position: None,
        }
    }
}

impl ServiceConfig {
    fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(self.timeout)
    }

    /// Build the cities collection client.
    pub fn cities_client(&self) -> Result<CitiesClient, CoreError> {
        Ok(CitiesClient::new(self.api_url.as_str(), &self.transport())?)
    }

    /// Build the reverse-geocoding client.
    pub fn geocoding_client(&self) -> Result<GeocodingClient, CoreError> {
        Ok(GeocodingClient::new(
            self.geocoding_url.as_str(),
            &self.transport(),
        )?)
    }
}
