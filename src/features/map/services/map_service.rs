use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::entities::services::Visibility;
use crate::features::map::models::{AddressFeatureRow, PopupRow};

pub struct MapService {
    pool: PgPool,
}

impl MapService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Addresses of the visible reports in a category; unknown slugs have none
    pub async fn features_for_category(
        &self,
        slug: &str,
        visibility: Visibility,
    ) -> Result<Vec<AddressFeatureRow>> {
        sqlx::query_as::<_, AddressFeatureRow>(
            r#"
            SELECT a.id, a.lon, a.lat, e.evaluation_id AS evaluation, e.published
            FROM addresses a
            JOIN entities e ON e.id = a.entity_id
            JOIN categories c ON c.id = e.category_id
            WHERE c.slug = $1 AND (e.published OR NOT $2)
            ORDER BY a.id
            "#,
        )
        .bind(slug)
        .bind(visibility == Visibility::PublishedOnly)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load map features for '{}': {:?}", slug, e);
            AppError::Database(e)
        })
    }

    /// One address for the map popup, subject to visibility
    pub async fn popup(&self, address_id: i64, visibility: Visibility) -> Result<PopupRow> {
        sqlx::query_as::<_, PopupRow>(
            r#"
            SELECT a.id, a.road, a.number, a.city, a.province,
                   e.id AS entity_id, e.title AS entity_title, e.published AS entity_published,
                   ev.full_name AS evaluation_name,
                   c.name AS category_name, c.icon AS category_icon,
                   (SELECT MAX(t.date_added) FROM testimonials t WHERE t.entity_id = e.id)
                       AS entity_latest_update,
                   (SELECT COUNT(*) FROM testimonials t WHERE t.entity_id = e.id)
                       AS entity_n_testimonials
            FROM addresses a
            JOIN entities e ON e.id = a.entity_id
            JOIN categories c ON c.id = e.category_id
            LEFT JOIN evaluation_levels ev ON ev.short_name = e.evaluation_id
            WHERE a.id = $1 AND (e.published OR NOT $2)
            "#,
        )
        .bind(address_id)
        .bind(visibility == Visibility::PublishedOnly)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load popup for address {}: {:?}", address_id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Address {} not found", address_id)))
    }
}
