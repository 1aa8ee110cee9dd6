//! Endpoint discovery

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::services::Endpoint;

/// GET /api/info/
pub async fn list_endpoints(
    State(state): State<AppState>,
) -> Result<Json<Vec<Endpoint>>, ApiError> {
    Ok(Json(state.info.endpoints().await?))
}
