use sqlx::PgPool;

use crate::core::database::{violation, Violation};
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CreateCategoryDto;
use crate::features::categories::models::Category;
use crate::shared::validation::slugify;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories, in insertion order
    pub async fn list(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, icon, slug
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Insert a category, deriving the slug from the name when none is given
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<Category> {
        let slug = resolve_slug(&dto)?;
        let icon = dto.icon.unwrap_or_default();

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, icon, slug)
            VALUES ($1, $2, $3)
            RETURNING id, name, icon, slug
            "#,
        )
        .bind(dto.name.trim())
        .bind(icon.trim())
        .bind(&slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::Unique) => {
                AppError::Conflict(format!("A category with slug '{}' already exists", slug))
            }
            _ => {
                tracing::error!("Failed to create category: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Category created: id={}, slug={}", category.id, category.slug);
        Ok(category)
    }

    /// Delete a category; refused while reports still belong to it
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey) => AppError::Conflict(format!(
                    "Category {} still has reports and cannot be deleted",
                    id
                )),
                _ => {
                    tracing::error!("Failed to delete category: {:?}", e);
                    AppError::Database(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Category deleted: id={}", id);
        Ok(())
    }
}

fn resolve_slug(dto: &CreateCategoryDto) -> Result<String> {
    let slug = match dto.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(&dto.name),
    };

    if slug.is_empty() {
        return Err(AppError::Validation(format!(
            "Cannot derive a slug from the name '{}'",
            dto.name
        )));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, slug: Option<&str>) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            icon: None,
            slug: slug.map(str::to_string),
        }
    }

    #[test]
    fn test_slug_derived_from_name() {
        assert_eq!(resolve_slug(&dto("Bar e ristoranti", None)).unwrap(), "bar-e-ristoranti");
        assert_eq!(resolve_slug(&dto("Musei", Some(""))).unwrap(), "musei");
    }

    #[test]
    fn test_explicit_slug_is_kept() {
        assert_eq!(resolve_slug(&dto("Musei", Some("arte"))).unwrap(), "arte");
    }

    #[test]
    fn test_underivable_slug() {
        assert!(matches!(
            resolve_slug(&dto("!!!", None)),
            Err(AppError::Validation(_))
        ));
    }
}
