use axum::{
    extract::{Query, State},
    response::Html,
};
use minijinja::context;
use serde::Deserialize;

use super::EntityPagesState;
use crate::core::error::PageError;
use crate::core::extractor::MaybeUser;
use crate::features::entities::services::{EntityFilters, EntityQuery, Visibility};

/// Query string of the report list
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub province: Option<String>,
    pub category: Option<String>,
    pub evaluation: Option<String>,
    pub search: Option<String>,
    /// Page number or `last`
    pub page: Option<String>,
}

impl ListParams {
    fn filters(&self) -> EntityFilters {
        EntityFilters {
            province: self.province.clone(),
            category: self.category.clone(),
            evaluation: self.evaluation.clone(),
            search: self.search.clone(),
            published: None,
        }
    }
}

/// Paginated, filterable list of reports
pub async fn list_entities(
    State(state): State<EntityPagesState>,
    MaybeUser(user): MaybeUser,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, PageError> {
    let site = &state.site;
    let visibility = Visibility::for_user(user.is_some());
    let query = EntityQuery::new(visibility, params.filters());

    let (entities, page) = state
        .entities
        .list_page(&query, params.page.as_deref(), &site.settings, &site.urls)
        .await?;

    let categories = state.categories.list().await?;
    let evaluations = state.evaluations.list().await?;
    let filters = query.filters();

    tracing::debug!(
        "Report list page {}/{} ({} reports, searching={})",
        page.number,
        page.num_pages,
        page.count,
        filters.is_searching()
    );

    let html = site.render(
        "map/list.html",
        context! {
            title => "Segnalazioni",
            user => user,
            entities => entities,
            page => page,
            searching => filters.is_searching(),
            filters => context! {
                province => filters.province,
                category => filters.category,
                evaluation => filters.evaluation,
                search => filters.search,
            },
            filter_query => filters.query_string(),
            provinces => site.settings.provinces,
            categories => categories,
            evaluations => evaluations,
        },
    )?;

    Ok(html)
}
