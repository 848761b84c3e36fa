use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// An address of a report in the requested category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AddressFeatureRow {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
    pub evaluation: Option<String>,
    pub published: bool,
}

/// An address with its report, category and testimonial aggregates
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PopupRow {
    pub id: i64,
    pub road: String,
    pub number: String,
    pub city: String,
    pub province: String,
    pub entity_id: i64,
    pub entity_title: String,
    pub entity_published: bool,
    pub evaluation_name: Option<String>,
    pub category_name: String,
    pub category_icon: String,
    pub entity_latest_update: Option<NaiveDate>,
    pub entity_n_testimonials: i64,
}
