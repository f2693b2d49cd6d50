// ── Geographic coordinate ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// `(0, 0)` is the historical "unset" sentinel. Sources that can be absent
/// are modelled as `Option<Position>` instead; `Position::default()` exists
/// for consumers that still expect the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const UNSET: Self = Self { lat: 0.0, lng: 0.0 };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True for the `(0, 0)` sentinel.
    #[allow(clippy::float_cmp)]
    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// Both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_unset_sentinel() {
        assert!(Position::default().is_unset());
        assert_eq!(Position::default(), Position::UNSET);
    }

    #[test]
    fn real_coordinates_are_set() {
        assert!(!Position::new(10.5, 20.1).is_unset());
        assert!(!Position::new(0.0, 20.1).is_unset());
    }

    #[test]
    fn validity_checks_ranges() {
        assert!(Position::new(48.8, 2.3).is_valid());
        assert!(!Position::new(91.0, 0.0).is_valid());
        assert!(!Position::new(0.0, f64::NAN).is_valid());
    }
}
