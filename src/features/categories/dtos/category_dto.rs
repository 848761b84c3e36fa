use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;

/// Request DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 60, message = "Name must be 1-60 characters"))]
    pub name: String,

    /// Font Awesome icon name
    #[validate(length(max = 20, message = "Icon must not exceed 20 characters"))]
    pub icon: Option<String>,

    /// Derived from the name when absent
    #[validate(
        length(min = 1, max = 50, message = "Slug must be 1-50 characters"),
        regex(
            path = "*crate::shared::validation::SLUG_REGEX",
            message = "Slug may only contain letters, numbers, hyphens and underscores"
        )
    )]
    pub slug: Option<String>,
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub slug: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            icon: c.icon,
            slug: c.slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_category_validation() {
        let dto = CreateCategoryDto {
            name: "Bar e ristoranti".to_string(),
            icon: Some("utensils".to_string()),
            slug: None,
        };
        assert!(dto.validate().is_ok());

        let bad_slug = CreateCategoryDto {
            slug: Some("bar e ristoranti".to_string()),
            ..dto.clone()
        };
        assert!(bad_slug.validate().is_err());

        let empty_name = CreateCategoryDto {
            name: String::new(),
            ..dto
        };
        assert!(empty_name.validate().is_err());
    }
}
