//! The `Breed` entity and the payload shapes used to create, replace and patch it.

use crate::domain::validation::{FieldError, ValidationError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length of a breed name, in characters.
pub const NAME_MAX_LEN: usize = 50;

/// A persisted cat breed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Breed {
    pub id: i64,
    pub name: String,
    pub location_of_origin: String,
    pub coat_length: f64,
    pub body_type: String,
    pub pattern: String,
}

/// Creation/replacement payload: every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewBreed {
    #[schema(max_length = 50)]
    pub name: String,
    pub location_of_origin: String,
    /// Must be greater than zero.
    pub coat_length: f64,
    pub body_type: String,
    pub pattern: String,
}

/// Partial-update payload. Absent (or `null`) fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BreedPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(max_length = 50)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_of_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coat_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Equality predicates for listing breeds. Every supplied predicate must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreedFilter {
    pub name: Option<String>,
    pub location_of_origin: Option<String>,
    pub coat_length: Option<f64>,
    pub body_type: Option<String>,
    pub pattern: Option<String>,
}

impl NewBreed {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        check_name(&self.name, &mut errors);
        check_coat_length(self.coat_length, &mut errors);
        ValidationError::from_errors(errors)
    }
}

impl From<NewBreed> for BreedPatch {
    fn from(breed: NewBreed) -> Self {
        Self {
            name: Some(breed.name),
            location_of_origin: Some(breed.location_of_origin),
            coat_length: Some(breed.coat_length),
            body_type: Some(breed.body_type),
            pattern: Some(breed.pattern),
        }
    }
}

impl BreedPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(coat_length) = self.coat_length {
            check_coat_length(coat_length, &mut errors);
        }
        ValidationError::from_errors(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location_of_origin.is_none()
            && self.coat_length.is_none()
            && self.body_type.is_none()
            && self.pattern.is_none()
    }

    /// Writes the supplied fields onto `breed`. The id is never touched.
    pub fn apply_to(&self, breed: &mut Breed) {
        if let Some(name) = &self.name {
            breed.name = name.clone();
        }
        if let Some(origin) = &self.location_of_origin {
            breed.location_of_origin = origin.clone();
        }
        if let Some(coat_length) = self.coat_length {
            breed.coat_length = coat_length;
        }
        if let Some(body_type) = &self.body_type {
            breed.body_type = body_type.clone();
        }
        if let Some(pattern) = &self.pattern {
            breed.pattern = pattern.clone();
        }
    }
}

impl BreedFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, breed: &Breed) -> bool {
        self.name.as_ref().map_or(true, |v| *v == breed.name)
            && self
                .location_of_origin
                .as_ref()
                .map_or(true, |v| *v == breed.location_of_origin)
            && self.coat_length.map_or(true, |v| v == breed.coat_length)
            && self.body_type.as_ref().map_or(true, |v| *v == breed.body_type)
            && self.pattern.as_ref().map_or(true, |v| *v == breed.pattern)
    }
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    let len = name.chars().count();
    if len > NAME_MAX_LEN {
        errors.push(FieldError::new(
            "name",
            format!("ensure this value has at most {} characters (got {})", NAME_MAX_LEN, len),
        ));
    }
}

fn check_coat_length(coat_length: f64, errors: &mut Vec<FieldError>) {
    if !coat_length.is_finite() || coat_length <= 0.0 {
        errors.push(FieldError::new(
            "coat_length",
            format!("ensure this value is greater than 0 (got {})", coat_length),
        ));
    }
}
