use axum::{routing::get, Router};

use crate::features::map::handlers::{self, MapState};

/// Map endpoints, relative to the mount prefix
pub fn routes(state: MapState) -> Router {
    Router::new()
        .route("/data/{file}", get(handlers::category_geojson))
        .route("/popup/{id}/", get(handlers::popup))
        .route("/fullscreen/", get(handlers::fullscreen_map))
        .with_state(state)
}
