//! Model endpoints: info, predict, interpret and attack

use axum::{
    extract::{Path, Query, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::CACHE_HIT_HEADER;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::model::{AttackerId, InterpreterId, ModelInfo};
use crate::domain::prediction::ModelAction;
use crate::infrastructure::services::PredictionOutcome;

#[derive(Debug, Default, Deserialize)]
pub struct CacheQuery {
    pub no_cache: Option<String>,
}

impl CacheQuery {
    /// Any `no_cache` parameter bypasses the cache, whatever its value
    pub fn bypass(&self) -> bool {
        self.no_cache.is_some()
    }
}

/// GET /api/{model_id}
pub async fn get_model_info(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<ModelInfo>, ApiError> {
    debug!(model_id = %model_id, "Getting model info");

    let info = state.predictions.info(&model_id).await?;
    Ok(Json(info))
}

/// POST /api/{model_id}/predict
pub async fn predict(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    Query(query): Query<CacheQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    run(&state, &model_id, ModelAction::Predict, &query, &body).await
}

/// POST /api/{model_id}/interpret/{interpreter}
pub async fn interpret(
    State(state): State<AppState>,
    Path((model_id, interpreter)): Path<(String, String)>,
    Query(query): Query<CacheQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let interpreter: InterpreterId = interpreter.parse()?;
    run(&state, &model_id, ModelAction::Interpret(interpreter), &query, &body).await
}

/// POST /api/{model_id}/attack/{attacker}
pub async fn attack(
    State(state): State<AppState>,
    Path((model_id, attacker)): Path<(String, String)>,
    Query(query): Query<CacheQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let attacker: AttackerId = attacker.parse()?;
    run(&state, &model_id, ModelAction::Attack(attacker), &query, &body).await
}

async fn run(
    state: &AppState,
    model_id: &str,
    action: ModelAction,
    query: &CacheQuery,
    body: &[u8],
) -> Result<Response, ApiError> {
    debug!(model_id, action = %action, no_cache = query.bypass(), "Running model");

    let PredictionOutcome { output, cache_hit } = state
        .predictions
        .run(model_id, action, body, query.bypass())
        .await?;

    let mut response = Json(output).into_response();
    if cache_hit {
        response
            .headers_mut()
            .insert(CACHE_HIT_HEADER, HeaderValue::from_static("1"));
    }

    Ok(response)
}
