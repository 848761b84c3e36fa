use sqlx::PgPool;

use crate::core::database::{violation, Violation};
use crate::core::error::{AppError, Result};
use crate::features::entities::dtos::{CreateAddressDto, CreateContactDto, CreateTestimonialDto};
use crate::features::entities::models::{Address, Contact, Testimonial};

/// Addresses, contacts and testimonials owned by a report
pub struct RecordService {
    pool: PgPool,
}

impl RecordService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add_address(&self, entity_id: i64, dto: CreateAddressDto) -> Result<Address> {
        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (road, number, city, province, lon, lat, entity_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, road, number, city, province, lon, lat, entity_id
            "#,
        )
        .bind(dto.road.trim())
        .bind(dto.number.trim())
        .bind(dto.city.trim())
        .bind(&dto.province)
        .bind(dto.lon)
        .bind(dto.lat)
        .bind(entity_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| owner_error(e, entity_id))?;

        tracing::info!("Address {} added to report {}", address.id, entity_id);
        Ok(address)
    }

    pub async fn delete_address(&self, id: i64) -> Result<()> {
        self.delete_from("addresses", id).await
    }

    pub async fn add_contact(&self, entity_id: i64, dto: CreateContactDto) -> Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (typology, contact, entity_id)
            VALUES ($1, $2, $3)
            RETURNING id, typology, contact, entity_id
            "#,
        )
        .bind(dto.typology)
        .bind(dto.contact.trim())
        .bind(entity_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| owner_error(e, entity_id))?;

        tracing::info!("Contact {} added to report {}", contact.id, entity_id);
        Ok(contact)
    }

    pub async fn delete_contact(&self, id: i64) -> Result<()> {
        self.delete_from("contacts", id).await
    }

    pub async fn add_testimonial(&self, entity_id: i64, dto: CreateTestimonialDto) -> Result<Testimonial> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (entity_id, title, body, date_added)
            VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE))
            RETURNING id, entity_id, title, body, date_added
            "#,
        )
        .bind(entity_id)
        .bind(dto.title.trim())
        .bind(&dto.body)
        .bind(dto.date_added)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| owner_error(e, entity_id))?;

        tracing::info!("Testimonial {} added to report {}", testimonial.id, entity_id);
        Ok(testimonial)
    }

    pub async fn delete_testimonial(&self, id: i64) -> Result<()> {
        self.delete_from("testimonials", id).await
    }

    /// `table` is always one of the owned-record tables above
    async fn delete_from(&self, table: &'static str, id: i64) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete from {}: {:?}", table, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Record {} not found in {}", id, table)));
        }

        tracing::info!("Deleted {} from {}", id, table);
        Ok(())
    }
}

/// A missing owner surfaces as a foreign key violation
fn owner_error(e: sqlx::Error, entity_id: i64) -> AppError {
    match violation(&e) {
        Some(Violation::ForeignKey) => AppError::NotFound(format!("Report {} not found", entity_id)),
        _ => {
            tracing::error!("Failed to add record to report {}: {:?}", entity_id, e);
            AppError::Database(e)
        }
    }
}
