//! Domain types for cat breed records: the entity, its payload schemas and error kinds.

pub mod breed;
pub mod error;
pub mod validation;

pub use breed::{Breed, BreedFilter, BreedPatch, NewBreed, NAME_MAX_LEN};
pub use error::{BreedError, CONFLICT_MESSAGE};
pub use validation::{FieldError, ValidationError};
