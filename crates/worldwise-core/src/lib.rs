//! City collection state engine and position reconciliation for worldwise.
//!
//! - **[`CollectionStore`]**: Owns the client-side view of the remote
//!   cities collection. Every change goes through the pure [`reduce`]
//!   function via one of the [`Transition`] kinds; state is published on a
//!   `tokio::sync::watch` channel and read through [`StateStream`]. The
//!   remote service is injected as a [`CityTransport`].
//!
//! - **[`PositionReconciler`]**: Unifies the URL query coordinate, the
//!   one-shot device geolocation result, and map clicks (written into the
//!   URL through a [`Navigator`]) into one map focus.
//!
//! - **[`CityForm`]**: Reverse-geocodes the form position and submits a
//!   new city through the store.
//!
//! - **[`FakeAuth`]**: The single-account login stub and its route guard.

pub mod auth;
pub mod config;
pub mod convert;
pub mod error;
pub mod form;
pub mod model;
pub mod position;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::{AuthAction, AuthState, FakeAuth, User, require_auth};
pub use config::ServiceConfig;
pub use error::CoreError;
pub use form::{CityForm, FormError, Geocoder};
pub use position::{
    DEFAULT_MAP_POSITION, FixedGeolocator, GeolocationError, GeolocationRequest, Geolocator,
    Location, MemoryNavigator, Navigator, PositionReconciler, PositionSignals,
    UnavailableGeolocator, reconcile,
};
pub use store::{CityTransport, CollectionState, CollectionStore, Outcome, Transition, reduce};
pub use stream::StateStream;

pub use worldwise_api::{CitiesClient, GeocodingClient};

pub use model::{
    City, CityId, CountrySummary, Place, Position, countries, flag_emoji, format_visit_date,
    wikipedia_url,
};
