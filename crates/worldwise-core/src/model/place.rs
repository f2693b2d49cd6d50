// ── Reverse-geocoded place ──

use serde::{Deserialize, Serialize};

/// What the reverse-geocoding lookup knows about a coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// `city`, falling back to `locality`; empty when neither is known.
    pub name: String,
    pub country: String,
    /// Two-letter code. `None` means the point is not inside a city.
    pub country_code: Option<String>,
}

impl Place {
    pub fn is_city(&self) -> bool {
        self.country_code.as_deref().is_some_and(|c| !c.is_empty())
    }
}
