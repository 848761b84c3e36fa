use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::admin::handlers::{self, AdminState};

/// Admin routes, nested under `/api/admin`; the caller applies the auth layer
pub fn routes(state: AdminState) -> Router {
    Router::new()
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/categories/{id}", delete(handlers::delete_category))
        .route(
            "/evaluation-levels",
            get(handlers::list_evaluation_levels).post(handlers::create_evaluation_level),
        )
        .route(
            "/evaluation-levels/{short_name}",
            delete(handlers::delete_evaluation_level),
        )
        .route(
            "/entities",
            get(handlers::list_entities).post(handlers::create_entity),
        )
        .route("/entities/bulk-publish", post(handlers::bulk_publish))
        .route(
            "/entities/{id}",
            put(handlers::update_entity).delete(handlers::delete_entity),
        )
        .route("/entities/{id}/addresses", post(handlers::create_address))
        .route("/entities/{id}/contacts", post(handlers::create_contact))
        .route(
            "/entities/{id}/testimonials",
            post(handlers::create_testimonial),
        )
        .route("/addresses/{id}", delete(handlers::delete_address))
        .route("/contacts/{id}", delete(handlers::delete_contact))
        .route("/testimonials/{id}", delete(handlers::delete_testimonial))
        .with_state(state)
}
