//! Login gate for the page actions.
//!
//! Anonymous callers are not refused: they are redirected to the login page
//! with a `next` parameter pointing back at the requested path.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, OriginalUri},
    http::request::Parts,
    response::Response,
};

use crate::features::auth::model::AuthenticatedUser;
use crate::shared::site::Site;

/// Extracts the logged-in user or redirects to the login page.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireLogin(user): RequireLogin) { ... }
/// ```
pub struct RequireLogin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireLogin
where
    S: Send + Sync,
    Arc<Site>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(RequireLogin(user.clone()));
        }

        // Nested routers see a stripped URI; redirect back to the full one
        let next = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        tracing::debug!("Anonymous request to {} redirected to login", next);
        let site = Arc::<Site>::from_ref(state);
        Err(site.login_redirect(&next))
    }
}
