// ── Remote collection seam ──
//
// The store talks to the cities collection through `CityTransport` so
// tests can substitute an in-memory fake.

use std::future::Future;

use worldwise_api::{CitiesClient, CityRecord};

use crate::error::CoreError;
use crate::model::{City, CityId};

/// The four remote calls the store makes. Each performs exactly one
/// request and never retries.
pub trait CityTransport: Send + Sync {
    fn list_cities(&self) -> impl Future<Output = Result<Vec<City>, CoreError>> + Send;

    fn get_city(&self, id: CityId) -> impl Future<Output = Result<City, CoreError>> + Send;

    /// Submit a record without its `id`; returns the stored record.
    fn create_city(&self, city: &City) -> impl Future<Output = Result<City, CoreError>> + Send;

    fn delete_city(&self, id: CityId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl CityTransport for CitiesClient {
    async fn list_cities(&self) -> Result<Vec<City>, CoreError> {
        let records = CitiesClient::list_cities(self).await?;
        Ok(records.into_iter().map(City::from).collect())
    }

    async fn get_city(&self, id: CityId) -> Result<City, CoreError> {
        Ok(CitiesClient::get_city(self, id.0).await?.into())
    }

    async fn create_city(&self, city: &City) -> Result<City, CoreError> {
        let draft = CityRecord::from(city);
        Ok(CitiesClient::create_city(self, &draft).await?.into())
    }

    async fn delete_city(&self, id: CityId) -> Result<(), CoreError> {
        Ok(CitiesClient::delete_city(self, id.0).await?)
    }
}
