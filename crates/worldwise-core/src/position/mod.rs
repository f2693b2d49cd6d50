// ── Position sources and reconciliation ──

mod geolocation;
mod location;
mod navigation;
mod reconciler;

pub use geolocation::{
    FixedGeolocator, GeolocationError, GeolocationRequest, Geolocator, UnavailableGeolocator,
};
pub use location::Location;
pub use navigation::{MemoryNavigator, Navigator};
pub use reconciler::{
    DEFAULT_MAP_POSITION, PositionReconciler, PositionSignals, form_route, reconcile,
};
