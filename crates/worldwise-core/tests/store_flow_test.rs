#![allow(clippy::unwrap_used)]
// Integration tests for `CollectionStore` against in-memory transports.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use tokio::sync::oneshot;

use worldwise_core::store::{
    CREATE_FAILED, DELETE_FAILED, LOAD_ALL_FAILED, LOAD_ONE_FAILED, MISSING_ID,
};
use worldwise_core::{
    City, CityId, CityTransport, CollectionState, CollectionStore, CoreError, Outcome, Position,
};

// ── Fakes ───────────────────────────────────────────────────────────

fn city(id: Option<u64>, name: &str, position: Position) -> City {
    City {
        id: id.map(CityId),
        city_name: name.into(),
        country: "France".into(),
        emoji: "FR".into(),
        date: "2024-06-01T10:00:00.000Z".into(),
        notes: String::new(),
        position,
    }
}

fn seeded() -> Vec<City> {
    vec![
        city(Some(1), "Lisbon", Position::new(38.7, -9.1)),
        city(Some(2), "Madrid", Position::new(40.4, -3.7)),
    ]
}

#[derive(Default)]
struct FakeCollection {
    cities: Mutex<Vec<City>>,
    next_id: AtomicUsize,
    gets: AtomicUsize,
    creates: AtomicUsize,
    offline: bool,
    omit_ids: bool,
}

impl FakeCollection {
    fn with(cities: Vec<City>) -> Self {
        Self {
            next_id: AtomicUsize::new(cities.len() + 1),
            cities: Mutex::new(cities),
            ..Self::default()
        }
    }

    fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.offline {
            return Err(CoreError::ConnectionFailed {
                url: "http://localhost:8000/cities".into(),
                reason: "connection refused".into(),
            });
        }
        Ok(())
    }
}

impl CityTransport for FakeCollection {
    async fn list_cities(&self) -> Result<Vec<City>, CoreError> {
        self.check()?;
        Ok(self.cities.lock().unwrap().clone())
    }

    async fn get_city(&self, id: CityId) -> Result<City, CoreError> {
        self.check()?;
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.cities
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.has_id(id))
            .cloned()
            .ok_or(CoreError::NotFound {
                identifier: id.to_string(),
            })
    }

    async fn create_city(&self, draft: &City) -> Result<City, CoreError> {
        self.check()?;
        self.creates.fetch_add(1, Ordering::SeqCst);
        assert_eq!(draft.id, None, "drafts are sent without an id");
        let mut created = draft.clone();
        if !self.omit_ids {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            created.id = Some(CityId(u64::try_from(id).unwrap()));
        }
        self.cities.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_city(&self, id: CityId) -> Result<(), CoreError> {
        self.check()?;
        self.cities.lock().unwrap().retain(|c| !c.has_id(id));
        Ok(())
    }
}

/// Holds `get_city` and `delete_city` until their gates are released.
struct GatedCollection {
    inner: FakeCollection,
    get_gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
    delete_gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedCollection {
    fn new(
        cities: Vec<City>,
        get_gate: oneshot::Receiver<()>,
        delete_gate: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            inner: FakeCollection::with(cities),
            get_gate: tokio::sync::Mutex::new(Some(get_gate)),
            delete_gate: tokio::sync::Mutex::new(Some(delete_gate)),
        }
    }
}

async fn pass(gate: &tokio::sync::Mutex<Option<oneshot::Receiver<()>>>) {
    let rx = gate.lock().await.take();
    if let Some(rx) = rx {
        let _ = rx.await;
    }
}

impl CityTransport for GatedCollection {
    async fn list_cities(&self) -> Result<Vec<City>, CoreError> {
        self.inner.list_cities().await
    }

    async fn get_city(&self, id: CityId) -> Result<City, CoreError> {
        pass(&self.get_gate).await;
        self.inner.get_city(id).await
    }

    async fn create_city(&self, draft: &City) -> Result<City, CoreError> {
        self.inner.create_city(draft).await
    }

    async fn delete_city(&self, id: CityId) -> Result<(), CoreError> {
        pass(&self.delete_gate).await;
        self.inner.delete_city(id).await
    }
}

// ── Load all ────────────────────────────────────────────────────────

#[tokio::test]
async fn mount_loads_every_city() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;
    let state = store.snapshot();

    assert_eq!(state.cities.len(), 2);
    assert!(!state.is_loading);
    assert_eq!(state.error, "");
    assert_eq!(state.current_city, None);
}

#[tokio::test]
async fn load_all_failure_sets_error_and_keeps_cities_empty() {
    let store = CollectionStore::new(FakeCollection::offline());
    let outcome = store.load_all().await;

    assert_eq!(
        outcome,
        Outcome::Rejected {
            reason: LOAD_ALL_FAILED.into()
        }
    );
    let state = store.snapshot();
    assert_eq!(state.error, LOAD_ALL_FAILED);
    assert!(state.cities.is_empty());
    assert!(!state.is_loading);
}

// ── Load one ────────────────────────────────────────────────────────

#[tokio::test]
async fn load_one_is_memoized_on_current_city() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;

    let first = store.load_one(CityId(2)).await;
    assert_eq!(first.applied().map(|c| c.city_name), Some("Madrid".to_owned()));
    let before = store.snapshot();

    let mut stream = store.subscribe();
    let second = store.load_one(CityId(2)).await;
    assert_eq!(second, Outcome::Unchanged);
    assert_eq!(store.transport().gets.load(Ordering::SeqCst), 1);
    assert_eq!(store.snapshot(), before);
    assert!(!stream.has_changed());
}

#[tokio::test]
async fn load_one_of_another_city_fetches_again() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;
    let _ = store.load_one(CityId(1)).await;
    let _ = store.load_one(CityId(2)).await;

    assert_eq!(store.transport().gets.load(Ordering::SeqCst), 2);
    assert_eq!(store.snapshot().current_id(), Some(CityId(2)));
}

#[tokio::test]
async fn load_one_missing_city_is_rejected() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;
    let outcome = store.load_one(CityId(99)).await;

    assert!(outcome.is_rejected());
    assert_eq!(store.error(), LOAD_ONE_FAILED);
    assert!(!store.is_loading());
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_appends_and_selects_the_new_city() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;
    let paris = city(None, "Paris", Position::new(48.8, 2.3));

    let created = store.create(paris).await.applied().unwrap();
    assert_eq!(created.id, Some(CityId(3)));

    let state = store.snapshot();
    assert_eq!(state.cities.len(), 3);
    assert_eq!(state.cities.last().and_then(|c| c.id), Some(CityId(3)));
    assert_eq!(state.current_id(), Some(CityId(3)));
    assert_eq!(state.current_city.unwrap().position, Position::new(48.8, 2.3));
}

#[tokio::test]
async fn create_strips_a_stale_id() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;
    let stale = city(Some(77), "Paris", Position::new(48.8, 2.3));

    let created = store.create(stale).await.applied().unwrap();
    assert_eq!(created.id, Some(CityId(3)));
}

#[tokio::test]
async fn create_without_assigned_id_is_rejected() {
    let transport = FakeCollection {
        omit_ids: true,
        ..FakeCollection::with(seeded())
    };
    let store = CollectionStore::mount(transport).await;

    let outcome = store.create(city(None, "Paris", Position::new(48.8, 2.3))).await;
    assert_eq!(
        outcome,
        Outcome::Rejected {
            reason: MISSING_ID.into()
        }
    );

    let state = store.snapshot();
    assert_eq!(state.cities.len(), 2);
    assert_eq!(state.current_city, None);
    assert_eq!(state.error, MISSING_ID);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn create_failure_is_rejected_with_fixed_message() {
    let store = CollectionStore::new(FakeCollection::offline());
    let err = store
        .create(city(None, "Paris", Position::new(48.8, 2.3)))
        .await
        .into_result()
        .unwrap_err();

    assert_eq!(err.to_string(), CREATE_FAILED);
    assert_eq!(store.error(), CREATE_FAILED);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_city_and_clears_current() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;
    let _ = store.create(city(None, "Paris", Position::new(48.8, 2.3))).await;

    assert_eq!(store.delete(CityId(3)).await, Outcome::Applied(CityId(3)));
    let state = store.snapshot();
    assert!(state.city(CityId(3)).is_none());
    assert_eq!(state.cities.len(), 2);
    assert_eq!(state.current_city, None);
}

#[tokio::test]
async fn delete_of_another_city_still_clears_current() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;
    let _ = store.load_one(CityId(2)).await;

    let _ = store.delete(CityId(1)).await;
    let state = store.snapshot();
    assert_eq!(state.current_city, None);
    assert_eq!(state.cities.len(), 1);
}

#[tokio::test]
async fn delete_failure_keeps_the_collection() {
    let store = CollectionStore::new(FakeCollection::offline());
    assert!(store.delete(CityId(1)).await.is_rejected());
    assert_eq!(store.error(), DELETE_FAILED);
}

#[tokio::test]
async fn load_create_delete_sequence() {
    let store = CollectionStore::mount(FakeCollection::with(seeded())).await;
    let created = store
        .create(city(None, "Hanoi", Position::new(21.0, 105.8)))
        .await
        .applied()
        .unwrap();
    let id = created.id.unwrap();

    for target in [id, CityId(500), CityId(1)] {
        let before = store.snapshot().cities;
        let existed = before.iter().any(|c| c.has_id(target));
        let _ = store.delete(target).await;
        let after = store.snapshot().cities;

        assert!(after.iter().all(|c| !c.has_id(target)));
        let expected = if existed { before.len() - 1 } else { before.len() };
        assert_eq!(after.len(), expected);
    }
}

// ── Concurrency ─────────────────────────────────────────────────────

#[tokio::test]
async fn shared_loading_flag_follows_the_last_resolver() {
    let (get_tx, get_rx) = oneshot::channel();
    let (delete_tx, delete_rx) = oneshot::channel();
    let store = CollectionStore::mount(GatedCollection::new(seeded(), get_rx, delete_rx)).await;
    let mut stream = store.subscribe();

    let driver = async move {
        get_tx.send(()).unwrap();
        let state = stream
            .wait_for(|s| s.current_city.is_some())
            .await
            .unwrap();
        // The delete is still in flight, yet the flag is already down.
        assert!(!state.is_loading);
        assert_eq!(state.cities.len(), 2);
        delete_tx.send(()).unwrap();
    };

    let (deleted, loaded, ()) = tokio::join!(
        store.delete(CityId(1)),
        store.load_one(CityId(2)),
        driver
    );

    assert!(deleted.is_applied());
    assert!(loaded.is_applied());
    let state = store.snapshot();
    assert_eq!(state.current_city, None);
    assert_eq!(state.cities.len(), 1);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn transitions_land_in_resolution_order() {
    let (get_tx, get_rx) = oneshot::channel();
    let (delete_tx, delete_rx) = oneshot::channel();
    let store = CollectionStore::mount(GatedCollection::new(seeded(), get_rx, delete_rx)).await;

    // The delete is issued second but resolves first, so the late
    // city-loaded leaves a current city behind.
    let mut stream = store.subscribe();
    let driver = async move {
        delete_tx.send(()).unwrap();
        stream.wait_for(|s| s.cities.len() == 1).await.unwrap();
        get_tx.send(()).unwrap();
    };
    let (loaded, deleted, ()) = tokio::join!(
        store.load_one(CityId(2)),
        store.delete(CityId(1)),
        driver
    );

    assert!(loaded.is_applied() && deleted.is_applied());
    let state = store.snapshot();
    assert_eq!(state.current_id(), Some(CityId(2)));
    assert_eq!(state.cities.len(), 1);
}

#[tokio::test]
async fn late_resolution_after_subscribers_leave_is_harmless() {
    let (get_tx, get_rx) = oneshot::channel();
    let (_delete_tx, delete_rx) = oneshot::channel();
    let store = CollectionStore::mount(GatedCollection::new(seeded(), get_rx, delete_rx)).await;

    let stream = store.subscribe();
    let driver = async move {
        drop(stream);
        get_tx.send(()).unwrap();
    };
    let (loaded, ()) = tokio::join!(store.load_one(CityId(1)), driver);

    assert!(loaded.is_applied());
    assert_eq!(store.snapshot().current_id(), Some(CityId(1)));
}

#[tokio::test]
async fn subscribers_see_loading_then_result() {
    let store = CollectionStore::new(FakeCollection::with(seeded()));
    let mut stream = store.subscribe();
    assert_eq!(stream.current(), &CollectionState::default());

    let _ = store.load_all().await;
    let state = stream.changed().await.unwrap();
    assert_eq!(state.cities.len(), 2);
    assert_eq!(stream.latest(), store.snapshot());
}
