//! Process-local breed store. Used by tests and by `BREED_STORE=memory`.

use crate::domain::{Breed, BreedFilter, BreedPatch, NewBreed};
use crate::storage::{BreedStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    rows: BTreeMap<i64, Breed>,
    /// Last id handed out. Ids are never reused, even after deletes.
    last_id: i64,
}

impl State {
    fn name_taken(&self, name: &str, except_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|b| b.name == name && Some(b.id) != except_id)
    }

    fn insert(&mut self, breed: &NewBreed) -> Breed {
        self.last_id += 1;
        let row = Breed {
            id: self.last_id,
            name: breed.name.clone(),
            location_of_origin: breed.location_of_origin.clone(),
            coat_length: breed.coat_length,
            body_type: breed.body_type.clone(),
            pattern: breed.pattern.clone(),
        };
        self.rows.insert(row.id, row.clone());
        row
    }
}

/// Mirrors the PostgreSQL table semantics: unique names, monotonically
/// increasing ids, id-ordered listing and all-or-nothing batch inserts.
#[derive(Default)]
pub struct InMemoryBreedStore {
    state: RwLock<State>,
}

impl InMemoryBreedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BreedStore for InMemoryBreedStore {
    async fn insert(&self, breed: &NewBreed) -> Result<Breed, StoreError> {
        let mut state = self.state.write().await;
        if state.name_taken(&breed.name, None) {
            return Err(StoreError::Duplicate);
        }
        Ok(state.insert(breed))
    }

    async fn insert_many(&self, breeds: &[NewBreed]) -> Result<Vec<Breed>, StoreError> {
        let mut state = self.state.write().await;
        // Check the whole batch before touching any row.
        for (idx, breed) in breeds.iter().enumerate() {
            let repeated = breeds[..idx].iter().any(|b| b.name == breed.name);
            if repeated || state.name_taken(&breed.name, None) {
                return Err(StoreError::Duplicate);
            }
        }
        Ok(breeds.iter().map(|b| state.insert(b)).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Breed>, StoreError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_by(&self, filter: &BreedFilter) -> Result<Vec<Breed>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect())
    }

    async fn update_by_id(&self, id: i64, changes: &BreedPatch) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&id) {
            return Ok(false);
        }
        if let Some(name) = &changes.name {
            if state.name_taken(name, Some(id)) {
                return Err(StoreError::Duplicate);
            }
        }
        if let Some(row) = state.rows.get_mut(&id) {
            changes.apply_to(row);
        }
        Ok(true)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.state.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
