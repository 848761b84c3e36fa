use axum::{
    extract::{Path, State},
    response::Response,
};

use super::EntityPagesState;
use crate::core::error::PageError;
use crate::features::auth::guards::RequireLogin;
use crate::shared::notice::Notice;
use crate::shared::responses::found_with_cookie;
use crate::shared::validation::parse_id;

/// Make a report visible to everyone
pub async fn publish_entity(
    RequireLogin(user): RequireLogin,
    State(state): State<EntityPagesState>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    let entity = state.entities.set_published(id, true).await?;
    tracing::info!("{} published report {}", user.display_name(), entity.id);

    let notice = Notice::success(format!("Hai reso pubblica la segnalazione {}", entity));
    Ok(redirect_to_detail(&state, entity.id, &notice))
}

/// Hide a report from anonymous visitors
pub async fn unpublish_entity(
    RequireLogin(user): RequireLogin,
    State(state): State<EntityPagesState>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    let entity = state.entities.set_published(id, false).await?;
    tracing::info!("{} unpublished report {}", user.display_name(), entity.id);

    let notice = Notice::warning(format!("Hai nascosto la segnalazione {}", entity));
    Ok(redirect_to_detail(&state, entity.id, &notice))
}

fn redirect_to_detail(state: &EntityPagesState, id: i64, notice: &Notice) -> Response {
    let urls = &state.site.urls;
    found_with_cookie(&urls.detail(id), &notice.set_cookie(&urls.cookie_path()))
}
