use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::AdminState;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::entities::dtos::{
    AdminEntityQuery, BulkPublishDto, BulkPublishResponseDto, EntityResponseDto,
    EntitySummaryDto, SaveEntityDto,
};
use crate::features::entities::services::{EntityQuery, Visibility};
use crate::shared::types::{ApiResponse, Meta};

/// List reports, published or not (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/entities",
    params(AdminEntityQuery),
    responses(
        (status = 200, description = "List of reports", body = ApiResponse<Vec<EntitySummaryDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_entities(
    State(state): State<AdminState>,
    Query(params): Query<AdminEntityQuery>,
) -> Result<Json<ApiResponse<Vec<EntitySummaryDto>>>> {
    let query = EntityQuery::new(Visibility::All, params.filters());
    let pagination = params.pagination();

    let total = state.entities.count(&query).await?;
    let items = state
        .entities
        .search(&query, pagination.limit(), pagination.offset())
        .await?
        .into_iter()
        .map(EntitySummaryDto::from)
        .collect();

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Create a report
#[utoipa::path(
    post,
    path = "/api/admin/entities",
    request_body = SaveEntityDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<EntityResponseDto>),
        (status = 400, description = "Validation error or unknown category/evaluation"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_entity(
    State(state): State<AdminState>,
    AppJson(dto): AppJson<SaveEntityDto>,
) -> Result<(StatusCode, Json<ApiResponse<EntityResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entity = state.entities.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(entity.into()), None, None)),
    ))
}

/// Replace a report's fields
#[utoipa::path(
    put,
    path = "/api/admin/entities/{id}",
    params(
        ("id" = i64, Path, description = "Report id")
    ),
    request_body = SaveEntityDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<EntityResponseDto>),
        (status = 400, description = "Validation error or unknown category/evaluation"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_entity(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SaveEntityDto>,
) -> Result<Json<ApiResponse<EntityResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entity = state.entities.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(entity.into()), None, None)))
}

/// Delete a report with its addresses, contacts and testimonials
#[utoipa::path(
    delete,
    path = "/api/admin/entities/{id}",
    params(
        ("id" = i64, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_entity(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.entities.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}

/// Publish or unpublish many reports at once
#[utoipa::path(
    post,
    path = "/api/admin/entities/bulk-publish",
    request_body = BulkPublishDto,
    responses(
        (status = 200, description = "Number of reports changed", body = ApiResponse<BulkPublishResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn bulk_publish(
    State(state): State<AdminState>,
    AppJson(dto): AppJson<BulkPublishDto>,
) -> Result<Json<ApiResponse<BulkPublishResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = state
        .entities
        .bulk_set_published(&dto.ids, dto.published)
        .await?;
    let message = if dto.published {
        format!("{} reports published", updated)
    } else {
        format!("{} reports hidden", updated)
    };

    Ok(Json(ApiResponse::success(
        Some(BulkPublishResponseDto { updated }),
        Some(message),
        None,
    )))
}
