use crate::domain::{Breed, BreedFilter, BreedPatch, NewBreed};
use crate::transport::http::types::{
    ApiError, AppState, BreedQuery, CreateBreedsRequest, CreatedBreeds, DeleteResponse,
    ErrorResponse,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    post,
    path = "/breeds",
    tag = "Breeds",
    request_body = CreateBreedsRequest,
    responses(
        (status = 201, description = "Breed(s) created", body = CreatedBreeds),
        (status = 400, description = "Breed with this name already exists", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ErrorResponse)
    )
)]
pub async fn create_breeds_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedBreeds>), ApiError> {
    let Json(body) = body?;

    let created = match CreateBreedsRequest::from_json(body)? {
        CreateBreedsRequest::Single(input) => CreatedBreeds::Single(state.breeds.create(input).await?),
        CreateBreedsRequest::Batch(inputs) => {
            CreatedBreeds::Batch(state.breeds.create_batch(inputs).await?)
        }
    };
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/breeds",
    tag = "Breeds",
    params(BreedQuery),
    responses(
        (status = 200, description = "Breeds matching every supplied filter", body = Vec<Breed>),
        (status = 422, description = "Invalid query string", body = ErrorResponse)
    )
)]
pub async fn list_breeds_handler(
    State(state): State<AppState>,
    query: Result<Query<BreedQuery>, QueryRejection>,
) -> Result<Json<Vec<Breed>>, ApiError> {
    let Query(query) = query?;
    let filter = BreedFilter::try_from(query)?;
    Ok(Json(state.breeds.list(&filter).await?))
}

#[utoipa::path(
    get,
    path = "/breeds/{id}",
    tag = "Breeds",
    params(("id" = i64, Path, description = "Breed id")),
    responses(
        (status = 200, description = "The breed", body = Breed),
        (status = 404, description = "No breed with this id", body = ErrorResponse)
    )
)]
pub async fn get_breed_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Breed>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.breeds.get(id).await?))
}

#[utoipa::path(
    put,
    path = "/breeds/{id}",
    tag = "Breeds",
    params(("id" = i64, Path, description = "Breed id")),
    request_body = NewBreed,
    responses(
        (status = 200, description = "Breed replaced", body = Breed),
        (status = 400, description = "Breed with this name already exists", body = ErrorResponse),
        (status = 404, description = "No breed with this id", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ErrorResponse)
    )
)]
pub async fn replace_breed_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewBreed>, JsonRejection>,
) -> Result<Json<Breed>, ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    Ok(Json(state.breeds.replace(id, input).await?))
}

#[utoipa::path(
    patch,
    path = "/breeds/{id}",
    tag = "Breeds",
    params(("id" = i64, Path, description = "Breed id")),
    request_body = BreedPatch,
    responses(
        (status = 200, description = "Breed updated", body = Breed),
        (status = 400, description = "Breed with this name already exists", body = ErrorResponse),
        (status = 404, description = "No breed with this id", body = ErrorResponse),
        (status = 422, description = "Invalid body", body = ErrorResponse)
    )
)]
pub async fn patch_breed_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<BreedPatch>, JsonRejection>,
) -> Result<Json<Breed>, ApiError> {
    let Path(id) = id?;
    let Json(changes) = body?;
    Ok(Json(state.breeds.patch(id, changes).await?))
}

#[utoipa::path(
    delete,
    path = "/breeds/{id}",
    tag = "Breeds",
    params(("id" = i64, Path, description = "Breed id")),
    responses(
        (status = 200, description = "Breed deleted", body = DeleteResponse),
        (status = 404, description = "No breed with this id", body = ErrorResponse)
    )
)]
pub async fn delete_breed_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id?;
    state.breeds.delete(id).await?;
    Ok(Json(DeleteResponse {
        message: format!("item with id {} deleted", id),
    }))
}
