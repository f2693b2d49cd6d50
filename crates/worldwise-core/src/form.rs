// ── City creation form ──
//
// Prefills a new city from the reverse-geocoded form position, then
// submits it through the store. The form position is the URL coordinate,
// never the map focus.

use std::future::Future;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::{debug, info};
use worldwise_api::GeocodingClient;

use crate::error::CoreError;
use crate::model::{City, Place, Position};
use crate::position::Navigator;
use crate::store::{CityTransport, CollectionStore, Outcome};

/// Route shown after a successful create.
pub const CITIES_ROUTE: &str = "/app/cities";

// ── Geocoder seam ───────────────────────────────────────────────────

/// Reverse-geocoding lookup.
pub trait Geocoder: Send + Sync {
    fn lookup(&self, position: Position) -> impl Future<Output = Result<Place, CoreError>> + Send;
}

impl Geocoder for GeocodingClient {
    async fn lookup(&self, position: Position) -> Result<Place, CoreError> {
        Ok(self.reverse(position.lat, position.lng).await?.into())
    }
}

// ── Errors ──────────────────────────────────────────────────────────

/// Form-level messages. None of these touch the collection state except
/// `Rejected`, which mirrors the store's `rejected` transition.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Start by clicking somewhere on the map")]
    NoPosition,

    #[error("That doesn't seem to be a city. Click somewhere else 🙄")]
    NotACity,

    #[error("Reverse geocoding failed: {0}")]
    Geocoding(String),

    #[error("A city name is required")]
    MissingCityName,

    #[error("{reason}")]
    Rejected { reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

// ── Form ────────────────────────────────────────────────────────────

/// Field values of the creation form.
#[derive(Debug, Clone, PartialEq)]
pub struct CityForm {
    pub city_name: String,
    pub country: String,
    /// Two-letter country code.
    pub emoji: String,
    pub date: DateTime<Utc>,
    pub notes: String,
    position: Option<Position>,
}

impl CityForm {
    /// Blank form focused on `position`, dated now.
    pub fn new(position: Option<Position>) -> Self {
        Self {
            city_name: String::new(),
            country: String::new(),
            emoji: String::new(),
            date: Utc::now(),
            notes: String::new(),
            position,
        }
    }

    /// Reverse-geocode `position` and fill name, country, and code.
    pub async fn prefill<G: Geocoder>(
        position: Option<Position>,
        geocoder: &G,
    ) -> Result<Self, FormError> {
        let Some(at) = position else {
            return Err(FormError::NoPosition);
        };

        let place = geocoder
            .lookup(at)
            .await
            .map_err(|e| FormError::Geocoding(e.to_string()))?;
        if !place.is_city() {
            debug!(position = %at, "no city at position");
            return Err(FormError::NotACity);
        }

        let mut form = Self::new(position);
        form.apply_place(place);
        Ok(form)
    }

    fn apply_place(&mut self, place: Place) {
        self.city_name = place.name;
        self.country = place.country;
        self.emoji = place.country_code.unwrap_or_default();
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn is_valid(&self) -> bool {
        !self.city_name.trim().is_empty() && self.position.is_some()
    }

    /// The record to submit (no `id`).
    pub fn to_city(&self) -> Result<City, FormError> {
        let position = self.position.ok_or(FormError::NoPosition)?;
        let city_name = self.city_name.trim();
        if city_name.is_empty() {
            return Err(FormError::MissingCityName);
        }
        Ok(City {
            id: None,
            city_name: city_name.to_owned(),
            country: self.country.clone(),
            emoji: self.emoji.clone(),
            date: self.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            notes: self.notes.clone(),
            position,
        })
    }

    /// Create the city, then show the list. Invalid forms never reach the
    /// store; a rejected create stays on the form.
    pub async fn submit<T, N>(
        &self,
        store: &CollectionStore<T>,
        navigator: &mut N,
    ) -> Result<City, FormError>
    where
        T: CityTransport,
        N: Navigator,
    {
        let city = self.to_city()?;
        match store.create(city).await {
            Outcome::Applied(created) => {
                info!(city = %created.city_name, "city created");
                navigator.navigate(CITIES_ROUTE)?;
                Ok(created)
            }
            Outcome::Rejected { reason } => Err(FormError::Rejected { reason }),
            Outcome::Unchanged => Err(FormError::Rejected {
                reason: crate::store::CREATE_FAILED.to_owned(),
            }),
        }
    }
}
