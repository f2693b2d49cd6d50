// ── City domain types ──

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use url::Url;

use super::position::Position;

// ── CityId ──────────────────────────────────────────────────────────

/// Identifier assigned by the collection service on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub u64);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for CityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// ── City ────────────────────────────────────────────────────────────

/// One visited place.
///
/// `id` is `None` until the collection service has stored the record.
/// `position` is fixed at creation from the form's focal coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CityId>,
    pub city_name: String,
    #[serde(default)]
    pub country: String,
    /// Two-letter country code selecting the flag glyph.
    #[serde(default)]
    pub emoji: String,
    /// ISO-8601 timestamp of the visit.
    pub date: String,
    #[serde(default)]
    pub notes: String,
    pub position: Position,
}

impl City {
    pub fn has_id(&self, id: CityId) -> bool {
        self.id == Some(id)
    }

    /// Detail route for this city, carrying its position in the query so
    /// the map re-centers on it.
    pub fn detail_link(&self) -> Option<String> {
        self.id.map(|id| {
            format!(
                "/app/cities/{id}?lat={}&lng={}",
                self.position.lat, self.position.lng
            )
        })
    }
}

// ── Presentation helpers ────────────────────────────────────────────

/// Human-readable visit date, e.g. `January 5, 2024`.
///
/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates; anything else
/// is returned unchanged.
pub fn format_visit_date(iso: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(iso) {
        return ts.format("%B %-d, %Y").to_string();
    }
    if let Ok(day) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return day.format("%B %-d, %Y").to_string();
    }
    iso.to_owned()
}

const WIKIPEDIA_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Wikipedia article link for a city name.
pub fn wikipedia_url(city_name: &str) -> String {
    let mut url = Url::parse(WIKIPEDIA_BASE).expect("static Wikipedia URL is valid");
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(city_name);
    }
    url.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn city_id_parses_and_displays() {
        let id: CityId = " 42 ".parse().unwrap();
        assert_eq!(id, CityId(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<CityId>().is_err());
    }

    #[test]
    fn city_serializes_with_camel_case_and_no_absent_id() {
        let city = City {
            id: None,
            city_name: "Paris".into(),
            country: "France".into(),
            emoji: "FR".into(),
            date: "2024-06-01T10:00:00.000Z".into(),
            notes: String::new(),
            position: Position::new(48.8, 2.3),
        };
        let json = serde_json::to_value(&city).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["cityName"], "Paris");
        assert_eq!(json["position"]["lat"], 48.8);
        assert_eq!(city.detail_link(), None);
    }

    #[test]
    fn detail_link_carries_position() {
        let city = City {
            id: Some(CityId(7)),
            city_name: "Hanoi".into(),
            country: "Vietnam".into(),
            emoji: "VN".into(),
            date: "2024-01-01T00:00:00.000Z".into(),
            notes: String::new(),
            position: Position::new(21.02, 105.84),
        };
        assert_eq!(
            city.detail_link().as_deref(),
            Some("/app/cities/7?lat=21.02&lng=105.84")
        );
    }

    #[test]
    fn formats_rfc3339_and_plain_dates() {
        assert_eq!(format_visit_date("2024-01-05T10:00:00.000Z"), "January 5, 2024");
        assert_eq!(format_visit_date("2023-12-24"), "December 24, 2023");
        assert_eq!(format_visit_date("yesterday"), "yesterday");
    }

    #[test]
    fn wikipedia_link_escapes_spaces() {
        assert_eq!(wikipedia_url("Lisbon"), "https://en.wikipedia.org/wiki/Lisbon");
        assert_eq!(
            wikipedia_url("Ho Chi Minh City"),
            "https://en.wikipedia.org/wiki/Ho%20Chi%20Minh%20City"
        );
    }
}
