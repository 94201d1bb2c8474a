//! The breed service.
//!
//! This module sits between the HTTP handlers and the record store. It is
//! responsible for:
//! 1.  Validating create, replace and patch payloads.
//! 2.  Enforcing name uniqueness before writing (the store's own constraint
//!     remains the authoritative guard against concurrent writers).
//! 3.  Turning missing ids into `NotFound`.

use crate::domain::{Breed, BreedError, BreedFilter, BreedPatch, NewBreed};
use crate::storage::BreedStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct BreedService {
    store: Arc<dyn BreedStore>,
}

impl BreedService {
    pub fn new(store: Arc<dyn BreedStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn BreedStore> {
        &self.store
    }

    pub async fn create(&self, input: NewBreed) -> Result<Breed, BreedError> {
        input.validate()?;
        self.ensure_name_free(&input.name, None).await?;

        let breed = self.store.insert(&input).await?;
        tracing::info!(id = breed.id, name = %breed.name, "breed created");
        Ok(breed)
    }

    /// Creates every breed of `inputs` or none of them.
    pub async fn create_batch(&self, inputs: Vec<NewBreed>) -> Result<Vec<Breed>, BreedError> {
        for (idx, input) in inputs.iter().enumerate() {
            input.validate().map_err(|e| e.at_index(idx))?;
        }
        for (idx, input) in inputs.iter().enumerate() {
            if inputs[..idx].iter().any(|other| other.name == input.name) {
                tracing::debug!(name = %input.name, "duplicate name inside batch");
                return Err(BreedError::Conflict);
            }
            self.ensure_name_free(&input.name, None).await?;
        }

        let breeds = self.store.insert_many(&inputs).await?;
        tracing::info!(count = breeds.len(), "breed batch created");
        Ok(breeds)
    }

    pub async fn list(&self, filter: &BreedFilter) -> Result<Vec<Breed>, BreedError> {
        Ok(self.store.find_by(filter).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Breed, BreedError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(BreedError::NotFound(id))
    }

    /// Overwrites every mutable field of the breed.
    pub async fn replace(&self, id: i64, input: NewBreed) -> Result<Breed, BreedError> {
        input.validate()?;
        self.get(id).await?;
        self.ensure_name_free(&input.name, Some(id)).await?;

        self.apply(id, &BreedPatch::from(input)).await
    }

    /// Overwrites only the supplied fields.
    pub async fn patch(&self, id: i64, changes: BreedPatch) -> Result<Breed, BreedError> {
        changes.validate()?;
        self.get(id).await?;
        if let Some(name) = &changes.name {
            self.ensure_name_free(name, Some(id)).await?;
        }

        self.apply(id, &changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), BreedError> {
        if !self.store.delete_by_id(id).await? {
            tracing::debug!(id, "delete of unknown breed");
            return Err(BreedError::NotFound(id));
        }
        tracing::info!(id, "breed deleted");
        Ok(())
    }

    async fn apply(&self, id: i64, changes: &BreedPatch) -> Result<Breed, BreedError> {
        // The row can vanish between the existence check and the write.
        if !self.store.update_by_id(id, changes).await? {
            return Err(BreedError::NotFound(id));
        }
        let breed = self.get(id).await?;
        tracing::info!(id, name = %breed.name, "breed updated");
        Ok(breed)
    }

    /// Fails with `Conflict` if another record (not `except_id`) already uses `name`.
    async fn ensure_name_free(&self, name: &str, except_id: Option<i64>) -> Result<(), BreedError> {
        let holders = self.store.find_by(&BreedFilter::by_name(name)).await?;
        if holders.iter().any(|b| Some(b.id) != except_id) {
            tracing::debug!(name, "breed name already taken");
            return Err(BreedError::Conflict);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBreedStore;

    fn service() -> BreedService {
        BreedService::new(Arc::new(InMemoryBreedStore::new()))
    }

    fn new_breed(name: &str) -> NewBreed {
        NewBreed {
            name: name.to_string(),
            location_of_origin: "Russia".to_string(),
            coat_length: 3.5,
            body_type: "Semi-cobby".to_string(),
            pattern: "Solid".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_rejects_duplicates() {
        let svc = service();
        let created = svc.create(new_breed("Russian Blue")).await.unwrap();
        assert_eq!(created.name, "Russian Blue");
        assert_eq!(svc.get(created.id).await.unwrap(), created);

        let err = svc.create(new_breed("Russian Blue")).await.unwrap_err();
        assert!(matches!(err, BreedError::Conflict));
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let mut input = new_breed("Bad");
        input.coat_length = 0.0;
        let err = service().create(input).await.unwrap_err();
        assert!(matches!(err, BreedError::Validation(_)));
    }

    #[tokio::test]
    async fn batch_is_all_or_nothing() {
        let svc = service();
        svc.create(new_breed("Taken")).await.unwrap();

        let err = svc
            .create_batch(vec![new_breed("Fresh"), new_breed("Taken")])
            .await
            .unwrap_err();
        assert!(matches!(err, BreedError::Conflict));
        assert!(svc
            .list(&BreedFilter::by_name("Fresh"))
            .await
            .unwrap()
            .is_empty());

        let mut invalid = new_breed("Other");
        invalid.coat_length = -1.0;
        let err = svc
            .create_batch(vec![new_breed("Fresh"), invalid])
            .await
            .unwrap_err();
        match err {
            BreedError::Validation(v) => assert_eq!(v.errors[0].field, "[1].coat_length"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn batch_rejects_repeated_names() {
        let err = service()
            .create_batch(vec![new_breed("Twin"), new_breed("Twin")])
            .await
            .unwrap_err();
        assert!(matches!(err, BreedError::Conflict));
    }

    #[tokio::test]
    async fn replace_overwrites_fields_and_keeps_id() {
        let svc = service();
        let created = svc.create(new_breed("Korat")).await.unwrap();

        let mut input = new_breed("Korat");
        input.location_of_origin = "Thailand".to_string();
        input.coat_length = 1.25;
        let replaced = svc.replace(created.id, input).await.unwrap();

        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.location_of_origin, "Thailand");
        assert_eq!(replaced.coat_length, 1.25);
    }

    #[tokio::test]
    async fn replace_checks_existence_and_conflicts() {
        let svc = service();
        let a = svc.create(new_breed("A")).await.unwrap();
        svc.create(new_breed("B")).await.unwrap();

        assert!(matches!(
            svc.replace(42, new_breed("Z")).await.unwrap_err(),
            BreedError::NotFound(42)
        ));
        assert!(matches!(
            svc.replace(a.id, new_breed("B")).await.unwrap_err(),
            BreedError::Conflict
        ));
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() {
        let svc = service();
        let created = svc.create(new_breed("Chartreux")).await.unwrap();

        let patched = svc
            .patch(
                created.id,
                BreedPatch {
                    body_type: Some("Robust".to_string()),
                    ..BreedPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.body_type, "Robust");
        assert_eq!(patched.name, created.name);
        assert_eq!(patched.pattern, created.pattern);
        assert_eq!(patched.coat_length, created.coat_length);
    }

    #[tokio::test]
    async fn patch_rename_allows_self_and_rejects_others() {
        let svc = service();
        let a = svc.create(new_breed("A")).await.unwrap();
        svc.create(new_breed("B")).await.unwrap();

        let to_self = BreedPatch {
            name: Some("A".to_string()),
            ..BreedPatch::default()
        };
        assert_eq!(svc.patch(a.id, to_self).await.unwrap().name, "A");

        let to_other = BreedPatch {
            name: Some("B".to_string()),
            ..BreedPatch::default()
        };
        assert!(matches!(
            svc.patch(a.id, to_other).await.unwrap_err(),
            BreedError::Conflict
        ));
    }

    #[tokio::test]
    async fn delete_is_permanent() {
        let svc = service();
        let created = svc.create(new_breed("Sphynx")).await.unwrap();
        svc.delete(created.id).await.unwrap();

        assert!(matches!(
            svc.get(created.id).await.unwrap_err(),
            BreedError::NotFound(_)
        ));
        assert!(matches!(
            svc.delete(created.id).await.unwrap_err(),
            BreedError::NotFound(_)
        ));
    }
}
