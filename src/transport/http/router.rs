use crate::domain::{Breed, BreedPatch, FieldError, NewBreed};
use crate::transport::http::handlers::{breeds, health};
use crate::transport::http::types::{
    AppState, CreateBreedsRequest, CreatedBreeds, DeleteResponse, ErrorResponse, HealthResponse,
};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        breeds::create_breeds_handler,
        breeds::list_breeds_handler,
        breeds::get_breed_handler,
        breeds::replace_breed_handler,
        breeds::patch_breed_handler,
        breeds::delete_breed_handler
    ),
    components(schemas(
        Breed,
        NewBreed,
        BreedPatch,
        CreateBreedsRequest,
        CreatedBreeds,
        DeleteResponse,
        ErrorResponse,
        FieldError,
        HealthResponse
    )),
    tags(
        (name = "Breeds", description = "Cat breed records"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/breeds",
            get(breeds::list_breeds_handler).post(breeds::create_breeds_handler),
        )
        .route(
            "/breeds/:id",
            get(breeds::get_breed_handler)
                .put(breeds::replace_breed_handler)
                .patch(breeds::patch_breed_handler)
                .delete(breeds::delete_breed_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
