// ── Navigable location ──
//
// A router location (path + query) parsed with the `url` crate against a
// placeholder origin, so relative targets resolve the way a browser would.

use std::fmt;
use std::sync::LazyLock;

use url::Url;

use crate::error::CoreError;
use crate::model::Position;

static ORIGIN: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("placeholder origin is valid"));

/// Current path and query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse an absolute route such as `/app/form?lat=1&lng=2`.
    pub fn parse(route: &str) -> Result<Self, CoreError> {
        Self::resolve(&ORIGIN, route)
    }

    /// Resolve `target` relative to `base` (`form?lat=..` against
    /// `/app/` gives `/app/form?lat=..`).
    pub(crate) fn resolve(base: &Url, target: &str) -> Result<Self, CoreError> {
        let url = base.join(target).map_err(|e| CoreError::InvalidRoute {
            route: target.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { url })
    }

    pub(crate) fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// First value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// The `lat`/`lng` query coordinate.
    ///
    /// `None` unless both parameters are present and parse as finite
    /// numbers. A literal `lat=0&lng=0` is a real position.
    pub fn url_position(&self) -> Option<Position> {
        let lat = parse_coordinate(self.query_param("lat")?.as_str())?;
        let lng = parse_coordinate(self.query_param("lng")?.as_str())?;
        Some(Position::new(lat, lng))
    }

    /// Path plus query, e.g. `/app/form?lat=1&lng=2`.
    pub fn href(&self) -> String {
        match self.url.query() {
            Some(q) => format!("{}?{q}", self.url.path()),
            None => self.url.path().to_owned(),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            url: ORIGIN.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
