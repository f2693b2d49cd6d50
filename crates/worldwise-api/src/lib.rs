// worldwise-api: Async Rust clients for the cities collection and reverse-geocoding services

pub mod cities;
pub mod error;
pub mod geocoding;
pub mod models;
pub mod transport;

pub use cities::CitiesClient;
pub use error::Error;
pub use geocoding::GeocodingClient;
pub use models::{CityRecord, GeocodeResponse, PositionRecord};
pub use transport::TransportConfig;
