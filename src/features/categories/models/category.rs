use serde::Serialize;
use sqlx::FromRow;

/// Database model for category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Font Awesome icon name, may be empty
    pub icon: String,
    pub slug: String,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
