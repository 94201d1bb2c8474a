use crate::domain::validation::ValidationError;
use crate::storage::StoreError;

pub const CONFLICT_MESSAGE: &str = "Breed with this name already exists";

/// Failure kinds of the breed operations.
#[derive(Debug, thiserror::Error)]
pub enum BreedError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Breed with this name already exists")]
    Conflict,

    #[error("Breed with id {0} does not exist")]
    NotFound(i64),

    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}

impl From<StoreError> for BreedError {
    fn from(err: StoreError) -> Self {
        match err {
            // The unique constraint is the authoritative guard; it reports the same conflict.
            StoreError::Duplicate => BreedError::Conflict,
            StoreError::Backend(e) => BreedError::Storage(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_public_contract() {
        assert_eq!(BreedError::Conflict.to_string(), CONFLICT_MESSAGE);
        assert_eq!(
            BreedError::NotFound(10).to_string(),
            "Breed with id 10 does not exist"
        );
    }

    #[test]
    fn storage_duplicate_becomes_conflict() {
        assert!(matches!(
            BreedError::from(StoreError::Duplicate),
            BreedError::Conflict
        ));
    }
}
