// ── One-shot geolocation capability ──

use std::future::Future;

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Position;

/// Why the device could not report a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Your device does not support geolocation")]
    Unsupported,

    #[error("User denied Geolocation")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout expired")]
    Timeout,
}

/// A single request for the device position. No cancellation once issued.
pub trait Geolocator: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<Position, GeolocationError>> + Send;
}

/// Always reports the configured position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocator(pub Position);

impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Position, GeolocationError> {
        Ok(self.0)
    }
}

/// A device without a location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGeolocator;

impl Geolocator for UnavailableGeolocator {
    async fn locate(&self) -> Result<Position, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// State of the one-shot request as the map sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeolocationRequest {
    pub is_loading: bool,
    pub position: Option<Position>,
    pub error: Option<String>,
}

impl GeolocationRequest {
    pub(crate) fn start(&mut self) {
        debug!("geolocation requested");
        self.is_loading = true;
    }

    /// Record the result. A failure leaves any earlier position in place.
    pub(crate) fn finish(&mut self, result: Result<Position, GeolocationError>) {
        self.is_loading = false;
        match result {
            Ok(position) => {
                debug!(%position, "geolocation resolved");
                self.position = Some(position);
            }
            Err(e) => {
                warn!(error = %e, "geolocation failed");
                self.error = Some(e.to_string());
            }
        }
    }
}
