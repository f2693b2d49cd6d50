// ── Reactive state streams ──
//
// Subscription types for consuming `CollectionState` changes.

use tokio::sync::watch;

use crate::store::CollectionState;

/// A subscription to the collection state.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via `changed()` and `wait_for()`.
pub struct StateStream {
    current: CollectionState,
    receiver: watch::Receiver<CollectionState>,
}

impl StateStream {
    pub(crate) fn new(receiver: watch::Receiver<CollectionState>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time or by the last `changed()`.
    pub fn current(&self) -> &CollectionState {
        &self.current
    }

    /// The latest state (may have changed since creation).
    pub fn latest(&self) -> CollectionState {
        self.receiver.borrow().clone()
    }

    /// Whether a transition has landed since the last `changed()`.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next transition, returning the new state.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<CollectionState> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Wait until the state satisfies `predicate`, returning that state.
    /// Returns `None` if the store is dropped first.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&CollectionState) -> bool,
    ) -> Option<CollectionState> {
        let snap = self.receiver.wait_for(predicate).await.ok()?.clone();
        self.current = snap.clone();
        Some(snap)
    }
}
