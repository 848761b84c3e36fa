use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use minijinja::context;

use super::EntityPagesState;
use crate::core::error::PageError;
use crate::core::extractor::MaybeUser;
use crate::features::entities::services::Visibility;
use crate::shared::notice::Notice;
use crate::shared::validation::parse_id;

/// One report with its testimonials; hidden reports are not found for anonymous callers
pub async fn get_entity(
    State(state): State<EntityPagesState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    let site = &state.site;
    let visibility = Visibility::for_user(user.is_some());

    let entity = state.entities.detail(id, visibility, &site.settings).await?;
    let notice = Notice::from_headers(&headers);

    let html = site.render(
        "map/detail.html",
        context! {
            title => entity.entity.title,
            user => user,
            entity => entity,
            notice => notice,
            publish_url => site.urls.publish(id),
            unpublish_url => site.urls.unpublish(id),
        },
    )?;

    let mut response = html.into_response();
    if notice.is_some() {
        let clear = Notice::clear_cookie(&site.urls.cookie_path());
        if let Ok(value) = HeaderValue::from_str(&clear) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    Ok(response)
}
