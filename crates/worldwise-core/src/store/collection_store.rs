// ── CollectionStore ──
//
// Owns the collection state exclusively. Every async operation dispatches
// `loading`, performs exactly one remote call, then dispatches one
// terminal transition. Transitions land in the order calls resolve.

use tokio::sync::watch;
use tracing::{debug, warn};

use super::outcome::Outcome;
use super::state::{CollectionState, Transition, reduce};
use super::transport::CityTransport;
use crate::model::{City, CityId};
use crate::stream::StateStream;

pub const LOAD_ALL_FAILED: &str = "There was an error while loading cities...";
pub const LOAD_ONE_FAILED: &str = "There was an error while loading city...";
pub const CREATE_FAILED: &str = "There was an error while creating the city...";
pub const DELETE_FAILED: &str = "There was an error while deleting the city...";
pub const MISSING_ID: &str = "The server did not assign an id to the new city";

/// Single source of truth for the remote cities collection.
///
/// Operations take `&self` and may run concurrently; they share one
/// `is_loading` flag, so whichever resolves last decides its value.
pub struct CollectionStore<T> {
    transport: T,
    state: watch::Sender<CollectionState>,
}

impl<T: CityTransport> CollectionStore<T> {
    /// Empty store; nothing loaded yet.
    pub fn new(transport: T) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self { transport, state }
    }

    /// Create the store and run the initial `load_all`.
    ///
    /// A failed initial load is recorded in the state, not returned.
    pub async fn mount(transport: T) -> Self {
        let store = Self::new(transport);
        if let Outcome::Rejected { reason } = store.load_all().await {
            debug!(%reason, "initial load rejected");
        }
        store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> CollectionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> String {
        self.state.borrow().error.clone()
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Apply one transition atomically. Works with zero subscribers.
    fn dispatch(&self, transition: Transition) {
        debug!(kind = transition.kind(), "dispatch");
        self.state
            .send_modify(|state| *state = reduce(std::mem::take(state), transition));
    }

    fn reject<V>(&self, reason: &str) -> Outcome<V> {
        self.dispatch(Transition::Rejected(reason.to_owned()));
        Outcome::Rejected {
            reason: reason.to_owned(),
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch the whole collection.
    pub async fn load_all(&self) -> Outcome<usize> {
        self.dispatch(Transition::Loading);
        match self.transport.list_cities().await {
            Ok(cities) => {
                let count = cities.len();
                self.dispatch(Transition::CitiesLoaded(cities));
                Outcome::Applied(count)
            }
            Err(e) => {
                warn!(error = %e, "load cities failed");
                self.reject(LOAD_ALL_FAILED)
            }
        }
    }

    /// Fetch one city into `current_city`.
    ///
    /// No transport call and no transition when `id` is already current.
    pub async fn load_one(&self, id: CityId) -> Outcome<City> {
        if self.state.borrow().current_id() == Some(id) {
            debug!(%id, "city already current");
            return Outcome::Unchanged;
        }

        self.dispatch(Transition::Loading);
        match self.transport.get_city(id).await {
            Ok(city) => {
                self.dispatch(Transition::CityLoaded(city.clone()));
                Outcome::Applied(city)
            }
            Err(e) => {
                warn!(%id, error = %e, "load city failed");
                self.reject(LOAD_ONE_FAILED)
            }
        }
    }

    /// Submit a new city. Any `id` on the draft is dropped.
    ///
    /// A response without an `id` is rejected.
    pub async fn create(&self, city: City) -> Outcome<City> {
        let draft = City { id: None, ..city };

        self.dispatch(Transition::Loading);
        match self.transport.create_city(&draft).await {
            Ok(created) if created.id.is_some() => {
                self.dispatch(Transition::CityCreated(created.clone()));
                Outcome::Applied(created)
            }
            Ok(_) => {
                warn!(city = %draft.city_name, "create returned no id");
                self.reject(MISSING_ID)
            }
            Err(e) => {
                warn!(city = %draft.city_name, error = %e, "create city failed");
                self.reject(CREATE_FAILED)
            }
        }
    }

    /// Delete a city by id.
    pub async fn delete(&self, id: CityId) -> Outcome<CityId> {
        self.dispatch(Transition::Loading);
        match self.transport.delete_city(id).await {
            Ok(()) => {
                self.dispatch(Transition::CityDeleted(id));
                Outcome::Applied(id)
            }
            Err(e) => {
                warn!(%id, error = %e, "delete city failed");
                self.reject(DELETE_FAILED)
            }
        }
    }
}
