use std::collections::HashMap;

use sqlx::PgPool;

use crate::core::database::{violation, Violation};
use crate::core::error::{AppError, Result};
use crate::core::settings::MapSettings;
use crate::features::entities::dtos::{AddressView, ContactView, EntityCard, EntityDetail, SaveEntityDto};
use crate::features::entities::models::{Address, Contact, Entity, EntitySummary, PublishedEntity, Testimonial};
use crate::features::entities::services::query::{EntityQuery, Visibility};
use crate::shared::types::PageInfo;
use crate::shared::urls::Urls;

/// Reads and state changes of reports
pub struct EntityService {
    pool: PgPool,
}

impl EntityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self, query: &EntityQuery) -> Result<i64> {
        let mut qb = query.count_builder();
        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count reports: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Ordered, annotated rows of `query`
    pub async fn search(&self, query: &EntityQuery, limit: i64, offset: i64) -> Result<Vec<EntitySummary>> {
        let mut qb = query.list_builder(limit, offset);
        qb.build_query_as::<EntitySummary>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })
    }

    /// The requested page of the report list, addresses and contacts attached
    pub async fn list_page(
        &self,
        query: &EntityQuery,
        requested_page: Option<&str>,
        settings: &MapSettings,
        urls: &Urls,
    ) -> Result<(Vec<EntityCard>, PageInfo)> {
        let count = self.count(query).await?;
        let page = PageInfo::resolve(requested_page, count, settings.pagination)?;

        let rows = self.search(query, page.limit(), page.offset()).await?;
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut addresses = group_by_entity(self.addresses_of(&ids).await?, |a| a.entity_id);
        let mut contacts = group_by_entity(self.contacts_of(&ids).await?, |c| c.entity_id);

        let cards = rows
            .into_iter()
            .map(|entity| EntityCard {
                detail_url: urls.detail(entity.id),
                addresses: address_views(addresses.remove(&entity.id), settings),
                contacts: contacts
                    .remove(&entity.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(ContactView::from)
                    .collect(),
                entity,
            })
            .collect();

        Ok((cards, page))
    }

    /// One visible report with its testimonials, newest first
    pub async fn detail(&self, id: i64, visibility: Visibility, settings: &MapSettings) -> Result<EntityDetail> {
        let mut qb = EntityQuery::by_id(visibility, id).single_builder();
        let entity = qb
            .build_query_as::<EntitySummary>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let testimonials = sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, entity_id, title, body, date_added
            FROM testimonials
            WHERE entity_id = $1
            ORDER BY date_added DESC, id DESC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load testimonials of report {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        let addresses = self.addresses_of(&[id]).await?;
        let contacts = self.contacts_of(&[id]).await?;

        Ok(EntityDetail {
            display_name: entity.display_name(),
            entity,
            addresses: address_views(Some(addresses), settings),
            contacts: contacts.into_iter().map(ContactView::from).collect(),
            testimonials,
        })
    }

    async fn addresses_of(&self, entity_ids: &[i64]) -> Result<Vec<Address>> {
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Address>(
            r#"
            SELECT id, road, number, city, province, lon, lat, entity_id
            FROM addresses
            WHERE entity_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(entity_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load addresses: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn contacts_of(&self, entity_ids: &[i64]) -> Result<Vec<Contact>> {
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, typology, contact, entity_id
            FROM contacts
            WHERE entity_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(entity_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load contacts: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Set the published flag of any report, visible or not.
    ///
    /// Setting the flag it already has is not an error.
    pub async fn set_published(&self, id: i64, published: bool) -> Result<PublishedEntity> {
        let entity = sqlx::query_as::<_, PublishedEntity>(
            r#"
            UPDATE entities e
            SET published = $2
            FROM categories c
            WHERE e.id = $1 AND c.id = e.category_id
            RETURNING e.id, e.title, c.name AS category_name
            "#,
        )
        .bind(id)
        .bind(published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report {}: {:?}", id, e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!("Report {} published={}", entity.id, published);
        Ok(entity)
    }

    /// Returns how many reports actually changed
    pub async fn bulk_set_published(&self, ids: &[i64], published: bool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE entities
            SET published = $2
            WHERE id = ANY($1) AND published <> $2
            "#,
        )
        .bind(ids)
        .bind(published)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to bulk update reports: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Bulk update: {} of {} reports set published={}",
            result.rows_affected(),
            ids.len(),
            published
        );
        Ok(result.rows_affected())
    }

    pub async fn create(&self, dto: SaveEntityDto) -> Result<Entity> {
        let entity = sqlx::query_as::<_, Entity>(
            r#"
            INSERT INTO entities (category_id, title, description, evaluation_id, published)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, category_id, title, description, evaluation_id, published
            "#,
        )
        .bind(dto.category_id)
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(&dto.evaluation_id)
        .bind(dto.published)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;

        tracing::info!("Report created: id={}", entity.id);
        Ok(entity)
    }

    pub async fn update(&self, id: i64, dto: SaveEntityDto) -> Result<Entity> {
        let entity = sqlx::query_as::<_, Entity>(
            r#"
            UPDATE entities
            SET category_id = $2, title = $3, description = $4, evaluation_id = $5, published = $6
            WHERE id = $1
            RETURNING id, category_id, title, description, evaluation_id, published
            "#,
        )
        .bind(id)
        .bind(dto.category_id)
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(&dto.evaluation_id)
        .bind(dto.published)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!("Report updated: id={}", entity.id);
        Ok(entity)
    }

    /// Delete a report together with its addresses, contacts and testimonials
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM entities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        tracing::info!("Report deleted: id={}", id);
        Ok(())
    }
}

/// Unknown category or evaluation level is the caller's mistake
fn write_error(e: sqlx::Error) -> AppError {
    match violation(&e) {
        Some(Violation::ForeignKey) => {
            AppError::Validation("Unknown category or evaluation level".to_string())
        }
        _ => {
            tracing::error!("Failed to save report: {:?}", e);
            AppError::Database(e)
        }
    }
}

fn group_by_entity<T>(rows: Vec<T>, key: impl Fn(&T) -> i64) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(key(&row)).or_default().push(row);
    }
    grouped
}

fn address_views(addresses: Option<Vec<Address>>, settings: &MapSettings) -> Vec<AddressView> {
    addresses
        .unwrap_or_default()
        .into_iter()
        .map(|address| {
            let province_name = settings.province_name(&address.province);
            AddressView::new(address, province_name)
        })
        .collect()
}
