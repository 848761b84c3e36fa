mod entity_service;
mod query;
mod record_service;

pub use entity_service::EntityService;
pub use query::{EntityFilters, EntityQuery, Visibility};
pub use record_service::RecordService;
