//! Model cards, task cards and the demo registry

use axum::extract::{Path, State};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::demo::{demos, groups, DemoConfig, DemoGroup};
use crate::domain::model::{ModelCard, ModelCardsById, TaskCardsById};

#[derive(Debug, Serialize)]
pub struct DemosResponse {
    pub groups: &'static [DemoGroup],
    pub demos: &'static [DemoConfig],
}

/// GET /api/demos/
pub async fn list_demos() -> Json<DemosResponse> {
    Json(DemosResponse {
        groups: groups(),
        demos: demos(),
    })
}

/// GET /api/model-cards/
pub async fn list_model_cards(
    State(state): State<AppState>,
) -> Result<Json<ModelCardsById>, ApiError> {
    Ok(Json(state.catalog.model_cards().await?))
}

/// GET /api/model-card/{card_id}
pub async fn get_model_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<ModelCard>, ApiError> {
    Ok(Json(state.catalog.model_card(&card_id).await?))
}

/// GET /api/tasks/
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<TaskCardsById>, ApiError> {
    Ok(Json(state.catalog.tasks().await?))
}
