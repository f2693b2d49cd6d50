// ── City collection store ──
//
// One owned `CollectionState`, mutated only through `reduce`, published
// to subscribers via a `watch` channel.

mod collection_store;
mod outcome;
mod state;
mod transport;

pub use collection_store::{
    CollectionStore, CREATE_FAILED, DELETE_FAILED, LOAD_ALL_FAILED, LOAD_ONE_FAILED, MISSING_ID,
};
pub use outcome::Outcome;
pub use state::{CollectionState, Transition, reduce};
pub use transport::CityTransport;
