//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::{
    CatalogService, InfoService, PermalinkService, PredictionService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub predictions: Arc<PredictionService>,
    pub permalinks: Arc<PermalinkService>,
    pub catalog: Arc<CatalogService>,
    pub info: Arc<InfoService>,
}

impl AppState {
    pub fn new(
        predictions: PredictionService,
        permalinks: PermalinkService,
        catalog: CatalogService,
        info: InfoService,
    ) -> Self {
        Self {
            predictions: Arc::new(predictions),
            permalinks: Arc::new(permalinks),
            catalog: Arc::new(catalog),
            info: Arc::new(info),
        }
    }
}
