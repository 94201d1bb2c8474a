pub mod breed_service;

pub use breed_service::BreedService;
