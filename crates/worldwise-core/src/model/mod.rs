// ── Domain model ──
//
// Canonical types shared by the store, the position logic, and consumers.

pub mod city;
pub mod country;
pub mod place;
pub mod position;

pub use city::{City, CityId, format_visit_date, wikipedia_url};
pub use country::{CountrySummary, countries, flag_emoji};
pub use place::Place;
pub use position::Position;
