use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::AdminState;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::evaluations::dtos::{CreateEvaluationLevelDto, EvaluationLevelResponseDto};
use crate::shared::types::{ApiResponse, Meta};

/// List evaluation levels
#[utoipa::path(
    get,
    path = "/api/admin/evaluation-levels",
    responses(
        (status = 200, description = "List of evaluation levels", body = ApiResponse<Vec<EvaluationLevelResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_evaluation_levels(
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<Vec<EvaluationLevelResponseDto>>>> {
    let levels: Vec<EvaluationLevelResponseDto> = state
        .evaluations
        .list()
        .await?
        .into_iter()
        .map(EvaluationLevelResponseDto::from)
        .collect();
    let total = levels.len() as i64;

    Ok(Json(ApiResponse::success(Some(levels), None, Some(Meta { total }))))
}

/// Create an evaluation level
#[utoipa::path(
    post,
    path = "/api/admin/evaluation-levels",
    request_body = CreateEvaluationLevelDto,
    responses(
        (status = 201, description = "Evaluation level created", body = ApiResponse<EvaluationLevelResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Code, name or color already taken")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_evaluation_level(
    State(state): State<AdminState>,
    AppJson(dto): AppJson<CreateEvaluationLevelDto>,
) -> Result<(StatusCode, Json<ApiResponse<EvaluationLevelResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let level = state.evaluations.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(level.into()), None, None)),
    ))
}

/// Delete an evaluation level
#[utoipa::path(
    delete,
    path = "/api/admin/evaluation-levels/{short_name}",
    params(
        ("short_name" = String, Path, description = "Evaluation level code")
    ),
    responses(
        (status = 200, description = "Evaluation level deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Evaluation level not found"),
        (status = 409, description = "Evaluation level in use")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_evaluation_level(
    State(state): State<AdminState>,
    Path(short_name): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.evaluations.delete(&short_name).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Evaluation level deleted".to_string()),
        None,
    )))
}
