// ── API-to-domain type conversions ──
//
// Bridges `worldwise_api` wire records into `worldwise_core::model` domain
// types and back. Empty optional strings from the geocoder collapse to
// "unknown" rather than being carried as `Some("")`.

use worldwise_api::{CityRecord, GeocodeResponse, PositionRecord};

use crate::model::{City, CityId, Place, Position};

// ── Position ───────────────────────────────────────────────────────

impl From<PositionRecord> for Position {
    fn from(p: PositionRecord) -> Self {
        Position::new(p.lat, p.lng)
    }
}

impl From<Position> for PositionRecord {
    fn from(p: Position) -> Self {
        PositionRecord {
            lat: p.lat,
            lng: p.lng,
        }
    }
}

// ── City ───────────────────────────────────────────────────────────

impl From<CityRecord> for City {
    fn from(r: CityRecord) -> Self {
        City {
            id: r.id.map(CityId),
            city_name: r.city_name,
            country: r.country,
            emoji: r.emoji,
            date: r.date,
            notes: r.notes,
            position: r.position.into(),
        }
    }
}

impl From<&City> for CityRecord {
    fn from(c: &City) -> Self {
        CityRecord {
            id: c.id.map(|id| id.0),
            city_name: c.city_name.clone(),
            country: c.country.clone(),
            emoji: c.emoji.clone(),
            date: c.date.clone(),
            notes: c.notes.clone(),
            position: c.position.into(),
        }
    }
}

// ── Place ──────────────────────────────────────────────────────────

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

impl From<GeocodeResponse> for Place {
    fn from(r: GeocodeResponse) -> Self {
        Place {
            name: non_empty(r.city)
                .or_else(|| non_empty(r.locality))
                .unwrap_or_default(),
            country: non_empty(r.country_name).unwrap_or_default(),
            country_code: non_empty(r.country_code),
        }
    }
}
