use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::AdminState;
use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::entities::dtos::{
    AddressResponseDto, ContactResponseDto, CreateAddressDto, CreateContactDto,
    CreateTestimonialDto, TestimonialResponseDto,
};
use crate::shared::types::ApiResponse;

/// Add an address to a report
#[utoipa::path(
    post,
    path = "/api/admin/entities/{id}/addresses",
    params(
        ("id" = i64, Path, description = "Report id")
    ),
    request_body = CreateAddressDto,
    responses(
        (status = 201, description = "Address added", body = ApiResponse<AddressResponseDto>),
        (status = 400, description = "Validation error or unknown province"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_address(
    State(state): State<AdminState>,
    Path(entity_id): Path<i64>,
    AppJson(dto): AppJson<CreateAddressDto>,
) -> Result<(StatusCode, Json<ApiResponse<AddressResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !state.site.settings.has_province(&dto.province) {
        return Err(AppError::Validation(format!(
            "province: '{}' is not one of the configured provinces",
            dto.province
        )));
    }

    let address = state.records.add_address(entity_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(address.into()), None, None)),
    ))
}

/// Delete an address
#[utoipa::path(
    delete,
    path = "/api/admin/addresses/{id}",
    params(
        ("id" = i64, Path, description = "Address id")
    ),
    responses(
        (status = 200, description = "Address deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Address not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_address(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.records.delete_address(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Address deleted".to_string()),
        None,
    )))
}

/// Add a contact to a report
#[utoipa::path(
    post,
    path = "/api/admin/entities/{id}/contacts",
    params(
        ("id" = i64, Path, description = "Report id")
    ),
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Contact added", body = ApiResponse<ContactResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_contact(
    State(state): State<AdminState>,
    Path(entity_id): Path<i64>,
    AppJson(dto): AppJson<CreateContactDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContactResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let contact = state.records.add_contact(entity_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(contact.into()), None, None)),
    ))
}

/// Delete a contact
#[utoipa::path(
    delete,
    path = "/api/admin/contacts/{id}",
    params(
        ("id" = i64, Path, description = "Contact id")
    ),
    responses(
        (status = 200, description = "Contact deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Contact not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_contact(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.records.delete_contact(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Contact deleted".to_string()),
        None,
    )))
}

/// Add a testimonial to a report
#[utoipa::path(
    post,
    path = "/api/admin/entities/{id}/testimonials",
    params(
        ("id" = i64, Path, description = "Report id")
    ),
    request_body = CreateTestimonialDto,
    responses(
        (status = 201, description = "Testimonial added", body = ApiResponse<TestimonialResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_testimonial(
    State(state): State<AdminState>,
    Path(entity_id): Path<i64>,
    AppJson(dto): AppJson<CreateTestimonialDto>,
) -> Result<(StatusCode, Json<ApiResponse<TestimonialResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let testimonial = state.records.add_testimonial(entity_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(testimonial.into()), None, None)),
    ))
}

/// Delete a testimonial
#[utoipa::path(
    delete,
    path = "/api/admin/testimonials/{id}",
    params(
        ("id" = i64, Path, description = "Testimonial id")
    ),
    responses(
        (status = 200, description = "Testimonial deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Testimonial not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_testimonial(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    state.records.delete_testimonial(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Testimonial deleted".to_string()),
        None,
    )))
}
