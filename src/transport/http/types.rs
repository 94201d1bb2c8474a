use crate::app::BreedService;
use crate::domain::{Breed, BreedError, BreedFilter, FieldError, NewBreed, ValidationError};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub breeds: BreedService,
}

/// Body of `POST /breeds`: one breed or an array of breeds.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum CreateBreedsRequest {
    Batch(Vec<NewBreed>),
    Single(NewBreed),
}

impl CreateBreedsRequest {
    /// Resolves the single/batch shape, reporting per-item errors with their index.
    pub fn from_json(value: JsonValue) -> Result<Self, ValidationError> {
        match value {
            JsonValue::Array(items) => {
                let mut breeds = Vec::with_capacity(items.len());
                let mut errors = Vec::new();
                for (idx, item) in items.into_iter().enumerate() {
                    match serde_json::from_value::<NewBreed>(item) {
                        Ok(b) => breeds.push(b),
                        Err(e) => errors.push(FieldError::new(format!("[{}]", idx), e.to_string())),
                    }
                }
                ValidationError::from_errors(errors)?;
                Ok(CreateBreedsRequest::Batch(breeds))
            }
            JsonValue::Object(_) => serde_json::from_value::<NewBreed>(value)
                .map(CreateBreedsRequest::Single)
                .map_err(|e| ValidationError::single("body", e.to_string())),
            other => Err(ValidationError::single(
                "body",
                format!("expected a breed object or an array of breeds, got {}", other),
            )),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum CreatedBreeds {
    Batch(Vec<Breed>),
    Single(Breed),
}

/// Optional equality filters for `GET /breeds`. Empty values are ignored.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BreedQuery {
    pub name: Option<String>,
    pub location_of_origin: Option<String>,
    /// Parsed as a number unless empty.
    #[param(value_type = Option<f64>)]
    pub coat_length: Option<String>,
    pub body_type: Option<String>,
    pub pattern: Option<String>,
}

impl TryFrom<BreedQuery> for BreedFilter {
    type Error = ValidationError;

    fn try_from(q: BreedQuery) -> Result<Self, Self::Error> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        let coat_length = match non_empty(q.coat_length) {
            Some(raw) => Some(raw.trim().parse::<f64>().map_err(|e| {
                ValidationError::single(
                    "query",
                    format!("coat_length: cannot parse {:?} as a number ({})", raw, e),
                )
            })?),
            None => None,
        };
        Ok(BreedFilter {
            name: non_empty(q.name),
            location_of_origin: non_empty(q.location_of_origin),
            coat_length,
            body_type: non_empty(q.body_type),
            pattern: non_empty(q.pattern),
        })
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
    /// Field-level detail, present on validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error returned by every breed handler.
#[derive(Debug)]
pub struct ApiError(pub BreedError);

impl From<BreedError> for ApiError {
    fn from(err: BreedError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(BreedError::Validation(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ValidationError::single("body", format!("Invalid JSON body: {}", err.body_text())).into()
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ValidationError::single("path.id", err.body_text()).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ValidationError::single("query", err.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            BreedError::Validation(v) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    detail: v.to_string(),
                    errors: Some(v.errors),
                },
            ),
            err @ BreedError::Conflict => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    detail: err.to_string(),
                    errors: None,
                },
            ),
            err @ BreedError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    detail: err.to_string(),
                    errors: None,
                },
            ),
            BreedError::Storage(e) => {
                tracing::error!(error = ?e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        detail: "Internal server error".to_string(),
                        errors: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn breed_json(name: &str) -> JsonValue {
        json!({
            "name": name,
            "location_of_origin": "Turkey",
            "coat_length": 4,
            "body_type": "Large",
            "pattern": "Van"
        })
    }

    #[test]
    fn object_body_is_a_single_create() {
        let req = CreateBreedsRequest::from_json(breed_json("Turkish Van")).unwrap();
        assert!(matches!(req, CreateBreedsRequest::Single(b) if b.coat_length == 4.0));
    }

    #[test]
    fn array_body_is_a_batch_create() {
        let req = CreateBreedsRequest::from_json(json!([breed_json("A"), breed_json("B")])).unwrap();
        assert!(matches!(req, CreateBreedsRequest::Batch(v) if v.len() == 2));
    }

    #[test]
    fn bad_batch_items_are_reported_by_index() {
        let err = CreateBreedsRequest::from_json(json!([breed_json("A"), {"name": "B"}])).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "[1]");
        assert!(err.errors[0].message.contains("missing field"));
    }

    #[test]
    fn scalar_body_is_rejected() {
        let err = CreateBreedsRequest::from_json(json!(12)).unwrap_err();
        assert_eq!(err.errors[0].field, "body");
    }

    #[test]
    fn empty_query_values_are_ignored() {
        let filter = BreedFilter::try_from(BreedQuery {
            name: Some(String::new()),
            coat_length: Some(String::new()),
            body_type: Some("Large".to_string()),
            ..BreedQuery::default()
        })
        .unwrap();
        assert_eq!(filter.name, None);
        assert_eq!(filter.coat_length, None);
        assert_eq!(filter.body_type.as_deref(), Some("Large"));
    }

    #[test]
    fn coat_length_query_is_parsed_or_rejected() {
        let filter = BreedFilter::try_from(BreedQuery {
            coat_length: Some("2.5".to_string()),
            ..BreedQuery::default()
        })
        .unwrap();
        assert_eq!(filter.coat_length, Some(2.5));

        let err = BreedFilter::try_from(BreedQuery {
            coat_length: Some("long".to_string()),
            ..BreedQuery::default()
        })
        .unwrap_err();
        assert_eq!(err.errors[0].field, "query");
    }
}
