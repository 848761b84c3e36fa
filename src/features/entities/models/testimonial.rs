use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Dated account attached to a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Testimonial {
    pub id: i64,
    pub entity_id: i64,
    pub title: String,
    /// Rich text
    pub body: String,
    pub date_added: NaiveDate,
}
