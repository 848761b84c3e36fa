use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::handlers as admin_handlers;
use crate::features::categories::dtos as categories_dtos;
use crate::features::entities::{dtos as entities_dtos, models as entities_models};
use crate::features::evaluations::dtos as evaluations_dtos;
use crate::features::map::{dtos as map_dtos, handlers as map_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Map (public)
        map_handlers::category_geojson,
        // Admin - categories
        admin_handlers::list_categories,
        admin_handlers::create_category,
        admin_handlers::delete_category,
        // Admin - evaluation levels
        admin_handlers::list_evaluation_levels,
        admin_handlers::create_evaluation_level,
        admin_handlers::delete_evaluation_level,
        // Admin - reports
        admin_handlers::list_entities,
        admin_handlers::create_entity,
        admin_handlers::update_entity,
        admin_handlers::delete_entity,
        admin_handlers::bulk_publish,
        // Admin - owned records
        admin_handlers::create_address,
        admin_handlers::delete_address,
        admin_handlers::create_contact,
        admin_handlers::delete_contact,
        admin_handlers::create_testimonial,
        admin_handlers::delete_testimonial,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Map
            map_dtos::FeatureCollection,
            map_dtos::Feature,
            map_dtos::PointGeometry,
            map_dtos::FeatureProperties,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Evaluation levels
            evaluations_dtos::CreateEvaluationLevelDto,
            evaluations_dtos::EvaluationLevelResponseDto,
            ApiResponse<Vec<evaluations_dtos::EvaluationLevelResponseDto>>,
            ApiResponse<evaluations_dtos::EvaluationLevelResponseDto>,
            // Reports
            entities_models::ContactTypology,
            entities_dtos::SaveEntityDto,
            entities_dtos::EntityResponseDto,
            entities_dtos::EntitySummaryDto,
            entities_dtos::BulkPublishDto,
            entities_dtos::BulkPublishResponseDto,
            entities_dtos::CreateAddressDto,
            entities_dtos::AddressResponseDto,
            entities_dtos::CreateContactDto,
            entities_dtos::ContactResponseDto,
            entities_dtos::CreateTestimonialDto,
            entities_dtos::TestimonialResponseDto,
            ApiResponse<Vec<entities_dtos::EntitySummaryDto>>,
            ApiResponse<entities_dtos::EntityResponseDto>,
            ApiResponse<entities_dtos::BulkPublishResponseDto>,
            ApiResponse<entities_dtos::AddressResponseDto>,
            ApiResponse<entities_dtos::ContactResponseDto>,
            ApiResponse<entities_dtos::TestimonialResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Current session"),
        (name = "map", description = "GeoJSON map layers (public)"),
        (name = "admin", description = "Data entry for categories, evaluation levels and reports"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Djeography API",
        version = "0.1.0",
        description = "Map data and admin API for Djeography",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
