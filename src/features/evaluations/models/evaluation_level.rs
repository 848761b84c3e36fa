use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct EvaluationLevel {
    /// Primary key, e.g. "NEG"
    pub short_name: String,
    pub full_name: String,
    /// Marker color on the map
    pub color: String,
}

impl std::fmt::Display for EvaluationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}
