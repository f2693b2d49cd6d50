// Reverse-geocoding lookup client.
//
// `GET {base}?latitude={lat}&longitude={lng}` -> GeocodeResponse

use tracing::debug;
use url::Url;

use crate::cities::handle_response;
use crate::error::Error;
use crate::models::GeocodeResponse;
use crate::transport::TransportConfig;

/// Async client for the reverse-geocoding service.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GeocodingClient {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Look up the place containing the given coordinate.
    pub async fn reverse(&self, lat: f64, lng: f64) -> Result<GeocodeResponse, Error> {
        let url = self.base_url.clone();
        debug!("GET {url} latitude={lat} longitude={lng}");

        let resp = self
            .http
            .get(url)
            .query(&[("latitude", lat), ("longitude", lng)])
            .send()
            .await?;
        handle_response(resp).await
    }
}
