mod map_handler;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::features::categories::CategoryService;
use crate::features::evaluations::EvaluationService;
use crate::features::map::services::MapService;
use crate::shared::site::Site;

pub use map_handler::*;

/// State of the map endpoints
#[derive(Clone, FromRef)]
pub struct MapState {
    pub map: Arc<MapService>,
    pub categories: Arc<CategoryService>,
    pub evaluations: Arc<EvaluationService>,
    pub site: Arc<Site>,
}
