pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::BreedService;
pub use domain::{Breed, BreedError, BreedFilter, BreedPatch, NewBreed};
pub use infra::{Config, StoreConfig};
pub use storage::{open_store, BreedStore, InMemoryBreedStore, PgBreedStore};
