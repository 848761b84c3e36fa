mod category_handler;
mod entity_handler;
mod evaluation_handler;
mod record_handler;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::features::categories::CategoryService;
use crate::features::entities::{EntityService, RecordService};
use crate::features::evaluations::EvaluationService;
use crate::shared::site::Site;

pub use category_handler::*;
pub use entity_handler::*;
pub use evaluation_handler::*;
pub use record_handler::*;

/// State of the admin API
#[derive(Clone, FromRef)]
pub struct AdminState {
    pub categories: Arc<CategoryService>,
    pub evaluations: Arc<EvaluationService>,
    pub entities: Arc<EntityService>,
    pub records: Arc<RecordService>,
    pub site: Arc<Site>,
}
