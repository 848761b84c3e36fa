mod detail_handler;
mod list_handler;
mod publish_handler;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::features::categories::CategoryService;
use crate::features::entities::services::EntityService;
use crate::features::evaluations::EvaluationService;
use crate::shared::site::Site;

pub use detail_handler::get_entity;
pub use list_handler::{list_entities, ListParams};
pub use publish_handler::{publish_entity, unpublish_entity};

/// State of the report pages
#[derive(Clone, FromRef)]
pub struct EntityPagesState {
    pub entities: Arc<EntityService>,
    pub categories: Arc<CategoryService>,
    pub evaluations: Arc<EvaluationService>,
    pub site: Arc<Site>,
}
