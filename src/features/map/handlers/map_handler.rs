use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
    Json,
};
use minijinja::context;
use serde::Serialize;

use super::MapState;
use crate::core::error::{AppError, PageError, Result};
use crate::core::extractor::MaybeUser;
use crate::features::entities::services::Visibility;
use crate::features::evaluations::services::color_map;
use crate::features::map::dtos::{Feature, FeatureCollection};
use crate::shared::validation::parse_id;

const GEOJSON_SUFFIX: &str = ".geojson";

/// Map layer of one category
///
/// Anonymous callers only get the addresses of published reports.
#[utoipa::path(
    get,
    path = "/data/{file}",
    params(
        ("file" = String, Path, description = "Category slug followed by .geojson, e.g. bar.geojson")
    ),
    responses(
        (status = 200, description = "GeoJSON feature collection", body = FeatureCollection),
        (status = 404, description = "Not a .geojson path")
    ),
    tag = "map"
)]
pub async fn category_geojson(
    State(state): State<MapState>,
    MaybeUser(user): MaybeUser,
    Path(file): Path<String>,
) -> Result<Json<FeatureCollection>> {
    let slug = file
        .strip_suffix(GEOJSON_SUFFIX)
        .filter(|slug| !slug.is_empty())
        .ok_or_else(|| AppError::NotFound(format!("No map layer at '{}'", file)))?;

    let visibility = Visibility::for_user(user.is_some());
    let rows = state.map.features_for_category(slug, visibility).await?;
    let urls = &state.site.urls;
    let features = rows
        .into_iter()
        .map(|row| Feature::from_row(row, urls))
        .collect::<Vec<_>>();

    tracing::debug!("Map layer '{}': {} features", slug, features.len());
    Ok(Json(FeatureCollection::new(features)))
}

#[derive(Serialize)]
struct LegendEntry {
    name: String,
    icon: String,
    url: String,
}

/// Full-page map with one layer per category
pub async fn fullscreen_map(
    State(state): State<MapState>,
    MaybeUser(user): MaybeUser,
) -> std::result::Result<Response, PageError> {
    let site = &state.site;
    let categories: Vec<LegendEntry> = state
        .categories
        .list()
        .await?
        .into_iter()
        .map(|category| LegendEntry {
            url: site.urls.data(&category.slug),
            name: category.name,
            icon: category.icon,
        })
        .collect();
    let levels = state.evaluations.list().await?;
    let colors = color_map(&levels, &site.settings.default_marker_color);
    let color_map_json = script_json(&colors)?;

    let html = site.render(
        "map/map.html",
        context! {
            title => "Mappa",
            user => user,
            categories => categories,
            evaluations => levels,
            color_map => colors,
            color_map_json => color_map_json,
        },
    )?;

    // Embeddable by same-origin pages only
    let mut response = html.into_response();
    response
        .headers_mut()
        .insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN"));
    Ok(response)
}

/// JSON safe to inline in a `<script>` block.
fn script_json<T: Serialize>(value: &T) -> std::result::Result<String, AppError> {
    let json = serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to encode map data: {}", e)))?;
    Ok(json.replace('<', "\\u003c"))
}

/// Popup fragment of one address
pub async fn popup(
    State(state): State<MapState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
) -> std::result::Result<Html<String>, PageError> {
    let id = parse_id(&id)?;
    let visibility = Visibility::for_user(user.is_some());
    let address = state.map.popup(id, visibility).await?;
    let site = &state.site;

    let html = site.render(
        "map/popup.html",
        context! {
            address => address,
            detail_url => site.urls.detail(address.entity_id),
        },
    )?;
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_script_json_escapes_closing_tags() {
        let mut colors = BTreeMap::new();
        colors.insert("x</script>".to_string(), "#fff".to_string());
        let json = script_json(&colors).unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains("\\u003c/script>"));
    }
}
