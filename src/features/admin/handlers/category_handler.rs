use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::AdminState;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto};
use crate::shared::types::{ApiResponse, Meta};

/// List all categories
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    State(state): State<AdminState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories: Vec<CategoryResponseDto> = state
        .categories
        .list()
        .await?
        .into_iter()
        .map(CategoryResponseDto::from)
        .collect();
    let total = categories.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Create a category
///
/// The slug is derived from the name when not given.
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug already taken")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    State(state): State<AdminState>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = state.categories.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category.into()), None, None)),
    ))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has reports")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.categories.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category deleted".to_string()),
        None,
    )))
}
