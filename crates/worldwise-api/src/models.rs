// Wire types for the cities collection and reverse-geocoding services
//
// Field names follow the JSON the services speak (camelCase). Optional
// text fields use `#[serde(default)]` because records created by older
// clients may omit them.

use serde::{Deserialize, Deserializer, Serialize};

// ── Cities collection ────────────────────────────────────────────────

/// A city record as stored by the collection service.
///
/// `id` is assigned by the service on creation and omitted from the
/// request body of `POST /cities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_id"
    )]
    pub id: Option<u64>,
    pub city_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub emoji: String,
    pub date: String,
    #[serde(default)]
    pub notes: String,
    pub position: PositionRecord,
}

/// `{ "lat": .., "lng": .. }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub lat: f64,
    pub lng: f64,
}

/// Accept ids as JSON numbers or numeric strings; anything else is absent.
///
/// Some collection servers store every id as a string even when it was
/// generated from a counter.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(n)) => Some(n),
        Some(RawId::Text(s)) => s.trim().parse().ok(),
        Some(RawId::Other(_)) | None => None,
    })
}

// ── Reverse geocoding ────────────────────────────────────────────────

/// Response of the reverse-geocoding lookup.
///
/// Every field is optional; a missing `countryCode` means the point is
/// not inside any city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResponse {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn paris() -> serde_json::Value {
        json!({
            "cityName": "Paris",
            "country": "France",
            "emoji": "FR",
            "date": "2024-06-01T10:00:00.000Z",
            "notes": "",
            "position": { "lat": 48.8, "lng": 2.3 }
        })
    }

    #[test]
    fn id_is_omitted_from_request_body() {
        let record: CityRecord = serde_json::from_value(paris()).unwrap();
        assert_eq!(record.id, None);

        let body = serde_json::to_value(&record).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["cityName"], "Paris");
    }

    #[test]
    fn numeric_string_id_is_accepted() {
        let mut raw = paris();
        raw["id"] = json!("73930385");
        let record: CityRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.id, Some(73_930_385));
    }

    #[test]
    fn non_numeric_id_is_treated_as_absent() {
        let mut raw = paris();
        raw["id"] = json!("a1b2");
        let record: CityRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.id, None);
    }

    #[test]
    fn missing_optional_text_defaults_to_empty() {
        let record: CityRecord = serde_json::from_value(json!({
            "id": 3,
            "cityName": "Lisbon",
            "date": "2024-01-01T00:00:00.000Z",
            "position": { "lat": 38.7, "lng": -9.1 }
        }))
        .unwrap();
        assert_eq!(record.country, "");
        assert_eq!(record.emoji, "");
        assert_eq!(record.notes, "");
    }

    #[test]
    fn geocode_response_tolerates_missing_fields() {
        let resp: GeocodeResponse = serde_json::from_value(json!({
            "locality": "Atlantic Ocean",
            "countryCode": ""
        }))
        .unwrap();
        assert_eq!(resp.city, None);
        assert_eq!(resp.locality.as_deref(), Some("Atlantic Ocean"));
        assert_eq!(resp.country_code.as_deref(), Some(""));
    }
}
