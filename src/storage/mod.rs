//! Record store for breeds: the persistence contract and its implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryBreedStore;
pub use postgres::PgBreedStore;

use crate::domain::{Breed, BreedFilter, BreedPatch, NewBreed};
use crate::infra::StoreConfig;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The unique-name constraint rejected the write.
    #[error("unique constraint violated on breed name")]
    Duplicate,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::Duplicate;
            }
        }
        StoreError::Backend(err.into())
    }
}

/// Persistence contract over the single `breed` table.
///
/// Each call is atomic with respect to the records it touches. The store is the
/// sole owner of identity assignment and enforces name uniqueness on its own,
/// independently of any check made by callers.
#[async_trait]
pub trait BreedStore: Send + Sync {
    /// Persists a new record and returns it with its assigned id.
    async fn insert(&self, breed: &NewBreed) -> Result<Breed, StoreError>;

    /// Persists every record or none of them.
    async fn insert_many(&self, breeds: &[NewBreed]) -> Result<Vec<Breed>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Breed>, StoreError>;

    /// Records matching every predicate of `filter`, in id order.
    async fn find_by(&self, filter: &BreedFilter) -> Result<Vec<Breed>, StoreError>;

    /// Applies the supplied fields. Returns `false` if no record has this id.
    async fn update_by_id(&self, id: i64, changes: &BreedPatch) -> Result<bool, StoreError>;

    /// Returns `false` if no record has this id.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Opens the store selected by configuration.
pub async fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn BreedStore>> {
    match config {
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PgBreedStore::connect(database_url, *max_connections).await?;
            Ok(Arc::new(store))
        }
        StoreConfig::Memory => Ok(Arc::new(InMemoryBreedStore::new())),
    }
}
