use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::evaluations::models::EvaluationLevel;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvaluationLevelDto {
    #[validate(length(min = 1, max = 3, message = "Short name must be 1-3 characters"))]
    pub short_name: String,

    #[validate(length(min = 1, max = 32, message = "Full name must be 1-32 characters"))]
    pub full_name: String,

    #[validate(length(min = 1, max = 32, message = "Color must be 1-32 characters"))]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluationLevelResponseDto {
    pub short_name: String,
    pub full_name: String,
    pub color: String,
}

impl From<EvaluationLevel> for EvaluationLevelResponseDto {
    fn from(level: EvaluationLevel) -> Self {
        Self {
            short_name: level.short_name,
            full_name: level.full_name,
            color: level.color,
        }
    }
}
