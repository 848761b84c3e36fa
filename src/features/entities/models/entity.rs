use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Row of the `entities` table
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Entity {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub evaluation_id: Option<String>,
    pub published: bool,
}

/// Report joined with its category and evaluation level, annotated with
/// testimonial aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct EntitySummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub published: bool,
    pub category_id: i64,
    pub category_name: String,
    pub category_icon: String,
    pub category_slug: String,
    pub evaluation_id: Option<String>,
    pub evaluation_name: Option<String>,
    pub evaluation_color: Option<String>,
    /// Date of the most recent testimonial
    pub latest_update: Option<NaiveDate>,
    pub n_testimonials: i64,
}

impl EntitySummary {
    /// "{title} ({category})"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.title, self.category_name)
    }
}

/// What a publish/unpublish touched
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PublishedEntity {
    pub id: i64,
    pub title: String,
    pub category_name: String,
}

impl std::fmt::Display for PublishedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.category_name)
    }
}
