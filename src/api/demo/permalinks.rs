//! Permalink endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::permalink::{NewPermalink, Permalink};

/// GET /api/permalink/{slug}
pub async fn get_permalink(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Permalink>, ApiError> {
    debug!(slug = %slug, "Getting permalink");

    let permalink = state.permalinks.get(&slug).await?;
    Ok(Json(permalink))
}

/// POST /api/permalink/ - returns the new slug as a JSON string
pub async fn create_permalink(
    State(state): State<AppState>,
    Json(permalink): Json<NewPermalink>,
) -> Result<Json<String>, ApiError> {
    let slug = state.permalinks.create(permalink).await?;
    Ok(Json(slug))
}

/// POST /api/permalink/noop - lets clients warm the service up
pub async fn noop() -> StatusCode {
    StatusCode::OK
}
