// ── Position reconciliation ──
//
// Three sources feed one map focus:
//   - the URL query coordinate (map clicks are written into the URL first)
//   - the one-shot device geolocation result
//   - a fixed fallback used until either of the above has applied
//
// A source applies when its value changes to a set position. The most
// recently applied source wins. The creation form reads the URL
// coordinate directly, so it can lag behind a geolocation override.

use tracing::debug;

use super::geolocation::{GeolocationError, GeolocationRequest, Geolocator};
use super::location::Location;
use super::navigation::Navigator;
use crate::error::CoreError;
use crate::model::Position;

/// Where the map focuses before any source has applied.
pub const DEFAULT_MAP_POSITION: Position = Position::new(11.938_82, 108.445_018);

// ── Signals ─────────────────────────────────────────────────────────

/// One source: the raw value last observed, and the last set value that
/// applied together with the revision at which it applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Signal {
    observed: Option<Position>,
    applied: Option<(Position, u64)>,
}

impl Signal {
    fn observe(&mut self, value: Option<Position>, clock: &mut u64) -> bool {
        if self.observed == value {
            return false;
        }
        self.observed = value;
        match value {
            Some(position) => {
                *clock += 1;
                self.applied = Some((position, *clock));
                true
            }
            None => false,
        }
    }
}

/// The named position inputs and their application order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionSignals {
    url: Signal,
    geolocation: Signal,
    clock: u64,
}

impl PositionSignals {
    /// Record the current URL coordinate. Returns `true` if it applied.
    pub fn observe_url(&mut self, value: Option<Position>) -> bool {
        self.url.observe(value, &mut self.clock)
    }

    /// Record the geolocation result. Returns `true` if it applied.
    pub fn observe_geolocation(&mut self, value: Option<Position>) -> bool {
        self.geolocation.observe(value, &mut self.clock)
    }

    /// The URL coordinate as last observed, set or not.
    pub fn url(&self) -> Option<Position> {
        self.url.observed
    }

    pub fn geolocation(&self) -> Option<Position> {
        self.geolocation.observed
    }
}

/// The most recently applied source, else `fallback`.
pub fn reconcile(signals: &PositionSignals, fallback: Position) -> Position {
    match (signals.url.applied, signals.geolocation.applied) {
        (Some((url, u)), Some((geo, g))) => {
            if g >= u {
                geo
            } else {
                url
            }
        }
        (Some((url, _)), None) => url,
        (None, Some((geo, _))) => geo,
        (None, None) => fallback,
    }
}

// ── Reconciler ──────────────────────────────────────────────────────

/// Owns the map focus and the one-shot geolocation request.
#[derive(Debug, Clone)]
pub struct PositionReconciler {
    signals: PositionSignals,
    fallback: Position,
    geolocation: GeolocationRequest,
}

impl Default for PositionReconciler {
    fn default() -> Self {
        Self::new(DEFAULT_MAP_POSITION)
    }
}

impl PositionReconciler {
    pub fn new(fallback: Position) -> Self {
        Self {
            signals: PositionSignals::default(),
            fallback,
            geolocation: GeolocationRequest::default(),
        }
    }

    /// Start from the navigator's current location.
    pub fn mount(fallback: Position, location: &Location) -> Self {
        let mut reconciler = Self::new(fallback);
        reconciler.on_url_changed(location);
        reconciler
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Where the map is focused.
    pub fn map_position(&self) -> Position {
        reconcile(&self.signals, self.fallback)
    }

    /// Where the creation form is focused: the URL coordinate only.
    pub fn form_position(&self) -> Option<Position> {
        self.signals.url()
    }

    pub fn geolocation(&self) -> &GeolocationRequest {
        &self.geolocation
    }

    /// The "use my position" action is offered only until a geolocation
    /// result exists.
    pub fn can_request_geolocation(&self) -> bool {
        self.geolocation.position.is_none() && !self.geolocation.is_loading
    }

    // ── Reactions ────────────────────────────────────────────────────

    /// React to a location change. Returns `true` if the map moved.
    pub fn on_url_changed(&mut self, location: &Location) -> bool {
        let applied = self.signals.observe_url(location.url_position());
        if applied {
            debug!(position = %self.map_position(), "map follows url");
        }
        applied
    }

    /// React to the end of a geolocation request. A failure is recorded
    /// but never moves the map.
    pub fn on_geolocation_resolved(&mut self, result: Result<Position, GeolocationError>) -> bool {
        self.geolocation.finish(result);
        let applied = self.signals.observe_geolocation(self.geolocation.position);
        if applied {
            debug!(position = %self.map_position(), "map follows geolocation");
        }
        applied
    }

    /// Ask the device for its position once. Returns `false` without
    /// asking when a result already exists or a request is pending.
    pub async fn request_geolocation<G: Geolocator>(&mut self, geolocator: &G) -> bool {
        if !self.can_request_geolocation() {
            return false;
        }
        self.geolocation.start();
        let result = geolocator.locate().await;
        self.on_geolocation_resolved(result)
    }

    /// A map click: write the coordinate into the URL via the navigator,
    /// then react to the new location.
    pub fn map_click<N: Navigator>(
        &mut self,
        position: Position,
        navigator: &mut N,
    ) -> Result<(), CoreError> {
        navigator.navigate(&form_route(position))?;
        self.on_url_changed(navigator.location());
        Ok(())
    }
}

/// Relative route to the creation form focused on `position`.
pub fn form_route(position: Position) -> String {
    format!("form?lat={}&lng={}", position.lat, position.lng)
}
