// ── Collection state and its transition function ──
//
// `reduce` is the only code that changes a `CollectionState`. It is pure:
// no I/O, no clocks, no randomness. `Transition` is a closed enum, so an
// unknown transition kind cannot reach it.

use serde::Serialize;

use crate::model::{City, CityId};

/// The client-side view of the remote cities collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionState {
    /// Server return order, new records appended.
    pub cities: Vec<City>,
    /// Record most recently loaded by id or just created.
    pub current_city: Option<City>,
    /// Shared by every in-flight operation; the last to resolve wins.
    pub is_loading: bool,
    /// Empty until an operation is rejected. Never cleared on success.
    pub error: String,
}

impl CollectionState {
    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.iter().find(|c| c.has_id(id))
    }

    pub fn current_id(&self) -> Option<CityId> {
        self.current_city.as_ref().and_then(|c| c.id)
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// A named state update.
#[derive(Debug, Clone, PartialEq, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Transition {
    Loading,
    CitiesLoaded(Vec<City>),
    CityLoaded(City),
    CityCreated(City),
    CityDeleted(CityId),
    Rejected(String),
}

impl Transition {
    /// Kebab-case name, e.g. `cities-loaded`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// Apply one transition.
pub fn reduce(mut state: CollectionState, transition: Transition) -> CollectionState {
    match transition {
        Transition::Loading => {
            state.is_loading = true;
        }
        Transition::CitiesLoaded(cities) => {
            state.cities = cities;
            state.is_loading = false;
        }
        Transition::CityLoaded(city) => {
            state.current_city = Some(city);
            state.is_loading = false;
        }
        Transition::CityCreated(city) => {
            state.cities.push(city.clone());
            state.current_city = Some(city);
            state.is_loading = false;
        }
        Transition::CityDeleted(id) => {
            state.cities.retain(|c| !c.has_id(id));
            state.current_city = None;
            state.is_loading = false;
        }
        Transition::Rejected(message) => {
            state.error = message;
            state.is_loading = false;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::Position;

    fn city(id: u64, name: &str) -> City {
        City {
            id: Some(CityId(id)),
            city_name: name.into(),
            country: "Portugal".into(),
            emoji: "PT".into(),
            date: "2027-10-31T15:59:59.138Z".into(),
            notes: String::new(),
            position: Position::new(38.7, -9.1),
        }
    }

    fn loaded(cities: Vec<City>) -> CollectionState {
        reduce(CollectionState::default(), Transition::CitiesLoaded(cities))
    }

    #[test]
    fn kinds_are_kebab_case() {
        assert_eq!(Transition::Loading.kind(), "loading");
        assert_eq!(Transition::CitiesLoaded(vec![]).kind(), "cities-loaded");
        assert_eq!(Transition::CityLoaded(city(1, "a")).kind(), "city-loaded");
        assert_eq!(Transition::CityCreated(city(1, "a")).kind(), "city-created");
        assert_eq!(Transition::CityDeleted(CityId(1)).kind(), "city-deleted");
        assert_eq!(Transition::Rejected(String::new()).kind(), "rejected");
    }

    #[test]
    fn loading_only_raises_the_flag() {
        let before = loaded(vec![city(1, "Lisbon")]);
        let after = reduce(before.clone(), Transition::Loading);
        assert!(after.is_loading);
        assert_eq!(after.cities, before.cities);
        assert_eq!(after.current_city, before.current_city);
        assert_eq!(after.error, before.error);
    }

    #[test]
    fn cities_loaded_replaces_the_collection() {
        let state = reduce(
            reduce(loaded(vec![city(9, "Old")]), Transition::Loading),
            Transition::CitiesLoaded(vec![city(1, "Lisbon"), city(2, "Madrid")]),
        );
        assert_eq!(state.cities.len(), 2);
        assert!(!state.is_loading);
        assert_eq!(state.error, "");
    }

    #[test]
    fn city_loaded_sets_current_only() {
        let state = reduce(
            loaded(vec![city(1, "Lisbon")]),
            Transition::CityLoaded(city(5, "Berlin")),
        );
        assert_eq!(state.current_id(), Some(CityId(5)));
        assert_eq!(state.cities.len(), 1);
    }

    #[test]
    fn create_appends_and_selects() {
        let state = reduce(
            loaded(vec![city(1, "Lisbon"), city(2, "Madrid")]),
            Transition::CityCreated(city(3, "Paris")),
        );
        assert_eq!(state.cities.last(), Some(&city(3, "Paris")));
        assert_eq!(state.current_id(), Some(CityId(3)));
        assert!(!state.is_loading);
    }

    #[test]
    fn delete_removes_and_always_clears_current() {
        let mut state = loaded(vec![city(1, "Lisbon"), city(2, "Madrid")]);
        state = reduce(state, Transition::CityLoaded(city(1, "Lisbon")));

        state = reduce(state, Transition::CityDeleted(CityId(2)));
        assert_eq!(state.cities.len(), 1);
        assert!(state.city(CityId(2)).is_none());
        assert_eq!(state.current_city, None);
    }

    #[test]
    fn delete_of_missing_id_leaves_cities_unchanged() {
        let before = loaded(vec![city(1, "Lisbon")]);
        let after = reduce(before.clone(), Transition::CityDeleted(CityId(42)));
        assert_eq!(after.cities, before.cities);
        assert_eq!(after.current_city, None);
    }

    #[test]
    fn load_create_delete_sequences_keep_counts() {
        for n in 0..5_u64 {
            let initial: Vec<City> = (1..=n).map(|i| city(i, "c")).collect();
            let mut state = loaded(initial);
            state = reduce(state, Transition::CityCreated(city(100, "new")));
            assert_eq!(state.cities.len(), usize::try_from(n + 1).unwrap_or(usize::MAX));

            for id in [1, 100, 1000] {
                let before = state.cities.len();
                let existed = state.city(CityId(id)).is_some();
                state = reduce(state, Transition::CityDeleted(CityId(id)));
                assert!(state.city(CityId(id)).is_none());
                let expected = if existed { before - 1 } else { before };
                assert_eq!(state.cities.len(), expected);
            }
        }
    }

    #[test]
    fn rejected_records_error_and_stops_loading() {
        let state = reduce(
            reduce(CollectionState::default(), Transition::Loading),
            Transition::Rejected("There was an error while loading cities...".into()),
        );
        assert!(state.has_error());
        assert!(!state.is_loading);
        assert!(state.cities.is_empty());
    }

    #[test]
    fn success_does_not_clear_a_pending_error() {
        let state = reduce(
            reduce(CollectionState::default(), Transition::Rejected("boom".into())),
            Transition::CitiesLoaded(vec![city(1, "Lisbon")]),
        );
        assert_eq!(state.error, "boom");
    }
}
