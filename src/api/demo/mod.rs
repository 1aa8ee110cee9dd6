//! Demo API endpoints, mounted under `/api`

pub mod catalog;
pub mod info;
pub mod models;
pub mod permalinks;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

pub fn create_demo_router() -> Router<AppState> {
    Router::new()
        .route("/info/", get(info::list_endpoints))
        .route("/demos/", get(catalog::list_demos))
        .route("/model-cards/", get(catalog::list_model_cards))
        .route("/model-card/{card_id}", get(catalog::get_model_card))
        .route("/tasks/", get(catalog::list_tasks))
        .route("/permalink/", post(permalinks::create_permalink))
        .route("/permalink/noop", post(permalinks::noop))
        .route("/permalink/{slug}", get(permalinks::get_permalink))
        .route("/{model_id}", get(models::get_model_info))
        .route("/{model_id}/predict", post(models::predict))
        .route(
            "/{model_id}/interpret/{interpreter}",
            post(models::interpret),
        )
        .route("/{model_id}/attack/{attacker}", post(models::attack))
}
