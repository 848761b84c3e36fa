use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::entities::models::{Entity, EntitySummary};
use crate::features::entities::services::EntityFilters;
use crate::shared::types::PaginationQuery;

/// Request DTO for creating or replacing a report
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveEntityDto {
    pub category_id: i64,

    #[validate(length(min = 1, max = 60, message = "Title must be 1-60 characters"))]
    pub title: String,

    /// Rich text, may be empty
    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, max = 3, message = "Evaluation must be 1-3 characters"))]
    pub evaluation_id: Option<String>,

    /// New reports default to unpublished
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntityResponseDto {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub evaluation_id: Option<String>,
    pub published: bool,
}

impl From<Entity> for EntityResponseDto {
    fn from(e: Entity) -> Self {
        Self {
            id: e.id,
            category_id: e.category_id,
            title: e.title,
            description: e.description,
            evaluation_id: e.evaluation_id,
            published: e.published,
        }
    }
}

/// Admin list row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntitySummaryDto {
    pub id: i64,
    pub title: String,
    pub published: bool,
    pub category_id: i64,
    pub category_name: String,
    pub category_slug: String,
    pub evaluation_id: Option<String>,
    pub evaluation_name: Option<String>,
    pub latest_update: Option<NaiveDate>,
    pub n_testimonials: i64,
}

impl From<EntitySummary> for EntitySummaryDto {
    fn from(e: EntitySummary) -> Self {
        Self {
            id: e.id,
            title: e.title,
            published: e.published,
            category_id: e.category_id,
            category_name: e.category_name,
            category_slug: e.category_slug,
            evaluation_id: e.evaluation_id,
            evaluation_name: e.evaluation_name,
            latest_update: e.latest_update,
            n_testimonials: e.n_testimonials,
        }
    }
}

/// Query params for the admin report list
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AdminEntityQuery {
    /// Match on title or address city
    pub search: Option<String>,
    /// Category slug
    pub category: Option<String>,
    pub published: Option<bool>,
    /// Evaluation level code
    pub evaluation: Option<String>,
    /// Page number (1-indexed, default: 1)
    pub page: Option<i64>,
    /// Number of items per page (default: 20, max: 100)
    pub page_size: Option<i64>,
}

impl AdminEntityQuery {
    pub fn filters(&self) -> EntityFilters {
        EntityFilters {
            province: None,
            category: self.category.clone(),
            evaluation: self.evaluation.clone(),
            search: self.search.clone(),
            published: self.published,
        }
    }

    pub fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkPublishDto {
    #[validate(length(min = 1, max = 500, message = "Provide 1-500 report ids"))]
    pub ids: Vec<i64>,
    pub published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkPublishResponseDto {
    /// Rows whose flag actually changed
    pub updated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_entity_defaults() {
        let dto: SaveEntityDto =
            serde_json::from_str(r#"{"category_id": 1, "title": "Bar Roma"}"#).unwrap();
        assert!(!dto.published);
        assert_eq!(dto.description, "");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_save_entity_rejects_long_title() {
        let dto = SaveEntityDto {
            category_id: 1,
            title: "x".repeat(61),
            description: String::new(),
            evaluation_id: Some("NEGATIVA".to_string()),
            published: false,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("evaluation_id"));
    }

    #[test]
    fn test_bulk_publish_needs_ids() {
        let dto = BulkPublishDto {
            ids: vec![],
            published: true,
        };
        assert!(dto.validate().is_err());
    }
}
