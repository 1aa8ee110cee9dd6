//! Infrastructure services

mod catalog_service;
mod info_service;
mod model_registry;
mod permalink_service;
mod prediction_service;

pub use catalog_service::CatalogService;
pub use info_service::{Endpoint, InfoService};
pub use model_registry::ModelRegistry;
pub use permalink_service::PermalinkService;
pub use prediction_service::{PredictionOutcome, PredictionService};
