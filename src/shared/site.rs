//! Everything a page handler needs besides the database: templates,
//! merged map settings and the URL builder.

use axum::response::{Html, Response};
use minijinja::{context, Value};
use serde::Serialize;

use crate::core::settings::MapSettings;
use crate::shared::responses::{found, login_redirect_location};
use crate::shared::templates::{TemplateEngine, TemplateError};
use crate::shared::urls::Urls;

pub struct Site {
    pub templates: TemplateEngine,
    pub settings: MapSettings,
    pub urls: Urls,
    pub login_url: String,
}

impl Site {
    pub fn new(templates: TemplateEngine, settings: MapSettings, urls: Urls, login_url: String) -> Self {
        Self {
            templates,
            settings,
            urls,
            login_url,
        }
    }

    /// Render a page; the navigation URLs are always in scope.
    pub fn render<S: Serialize>(&self, template_name: &str, ctx: S) -> Result<Html<String>, TemplateError> {
        let ctx = context! {
            list_url => self.urls.list(),
            map_url => self.urls.fullscreen(),
            ..Value::from_serialize(&ctx)
        };
        self.templates.render(template_name, ctx).map(Html)
    }

    /// 302 to the login page, coming back to `next` afterwards
    pub fn login_redirect(&self, next: &str) -> Response {
        found(&login_redirect_location(&self.login_url, next))
    }
}
