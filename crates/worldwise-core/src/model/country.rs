// ── Country list derivation ──

use serde::{Deserialize, Serialize};

use super::city::City;

/// One entry of the visited-countries view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub emoji: String,
    pub cities: usize,
}

/// Unique countries in first-seen order.
///
/// The emoji of the first city seen for a country is kept.
pub fn countries(cities: &[City]) -> Vec<CountrySummary> {
    let mut out: Vec<CountrySummary> = Vec::new();
    for city in cities {
        match out.iter_mut().find(|c| c.country == city.country) {
            Some(existing) => existing.cities += 1,
            None => out.push(CountrySummary {
                country: city.country.clone(),
                emoji: city.emoji.clone(),
                cities: 1,
            }),
        }
    }
    out
}

/// Turn a two-letter country code into its regional-indicator flag.
///
/// Returns an empty string for anything that is not two ASCII letters.
pub fn flag_emoji(country_code: &str) -> String {
    let code = country_code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return String::new();
    }
    code.to_ascii_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(0x1F1E6 + (u32::from(c) - u32::from('A'))))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Position;

    fn city(name: &str, country: &str, emoji: &str) -> City {
        City {
            id: None,
            city_name: name.into(),
            country: country.into(),
            emoji: emoji.into(),
            date: "2024-01-01T00:00:00.000Z".into(),
            notes: String::new(),
            position: Position::new(1.0, 1.0),
        }
    }

    #[test]
    fn countries_are_unique_in_first_seen_order() {
        let cities = vec![
            city("Lisbon", "Portugal", "PT"),
            city("Madrid", "Spain", "ES"),
            city("Porto", "Portugal", "PT"),
        ];
        let list = countries(&cities);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].country, "Portugal");
        assert_eq!(list[0].cities, 2);
        assert_eq!(list[1].country, "Spain");
    }

    #[test]
    fn no_cities_no_countries() {
        assert!(countries(&[]).is_empty());
    }

    #[test]
    fn flag_from_country_code() {
        assert_eq!(flag_emoji("pt"), "\u{1F1F5}\u{1F1F9}");
        assert_eq!(flag_emoji("FR"), "\u{1F1EB}\u{1F1F7}");
        assert_eq!(flag_emoji(""), "");
        assert_eq!(flag_emoji("FRA"), "");
        assert_eq!(flag_emoji("1A"), "");
    }
}
