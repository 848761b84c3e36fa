//! Page templates rendered with Jinja2 syntax.
//!
//! Templates live in `templates/map/` at the crate root and are embedded in the
//! binary, so rendering never depends on the working directory.

use chrono::NaiveDate;
use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

const TEMPLATES: &[(&str, &str)] = &[
    (
        "map/base.html",
        include_str!("../../../templates/map/base.html"),
    ),
    (
        "map/list.html",
        include_str!("../../../templates/map/list.html"),
    ),
    (
        "map/pagination.html",
        include_str!("../../../templates/map/pagination.html"),
    ),
    (
        "map/detail.html",
        include_str!("../../../templates/map/detail.html"),
    ),
    ("map/map.html", include_str!("../../../templates/map/map.html")),
    (
        "map/popup.html",
        include_str!("../../../templates/map/popup.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| TemplateError::RenderError(format!("{}: {}", name, e)))?;
            tracing::debug!("Loaded template: {}", name);
        }

        env.add_filter("date_it", date_it);

        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, template_name: &str, ctx: S) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

/// `2025-05-29` -> `29/05/2025`; anything unparsable is passed through.
fn date_it(value: String) -> String {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_load() {
        let engine = TemplateEngine::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(engine.env.get_template(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_missing_template() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.render("map/nope.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    fn list_context(is_paginated: bool) -> serde_json::Value {
        serde_json::json!({
            "title": "Segnalazioni",
            "list_url": "/entities/",
            "map_url": "/fullscreen/",
            "entities": [],
            "page": {
                "number": 1,
                "num_pages": if is_paginated { 2 } else { 1 },
                "count": if is_paginated { 7 } else { 1 },
                "has_previous": false,
                "has_next": is_paginated,
                "next_page_number": if is_paginated { Some(2) } else { None },
                "is_paginated": is_paginated,
            },
            "searching": false,
            "filters": {},
            "filter_query": "category=bar&",
            "provinces": [{"code": "PI", "name": "Pisa"}],
            "categories": [],
            "evaluations": [],
        })
    }

    #[test]
    fn test_pagination_rendered_only_when_paginated() {
        let engine = TemplateEngine::new().unwrap();

        let single = engine.render("map/list.html", list_context(false)).unwrap();
        assert!(!single.contains("class=\"pagination\""));
        assert!(single.contains("Nessuna segnalazione trovata."));

        let paged = engine.render("map/list.html", list_context(true)).unwrap();
        assert!(paged.contains("class=\"pagination\""));
        assert!(paged.contains("?category=bar&amp;page=2"));
    }

    #[test]
    fn test_detail_renders_contacts_and_rich_text() {
        let engine = TemplateEngine::new().unwrap();
        let ctx = serde_json::json!({
            "title": "Bar Roma",
            "list_url": "/entities/",
            "map_url": "/fullscreen/",
            "user": null,
            "entity": {
                "title": "Bar Roma",
                "published": true,
                "category_name": "Bar",
                "description": "<p>Accessibile</p>",
                "addresses": [],
                "contacts": [{
                    "typology": "tel",
                    "label": "Telefono",
                    "contact": "0464 241649",
                    "href": "tel:0464241649",
                }],
                "testimonials": [{
                    "title": "Visita",
                    "date_added": "2025-05-29",
                    "body": "<b>ok</b>",
                }],
            },
            "publish_url": "/entities/1/publish/",
            "unpublish_url": "/entities/1/unpublish/",
        });

        let html = engine.render("map/detail.html", ctx).unwrap();
        assert!(html.contains("href=\"tel:0464241649\""));
        assert!(html.contains("<p>Accessibile</p>"));
        assert!(html.contains("29/05/2025"));
        // Anonymous visitors get no publish controls
        assert!(!html.contains("/entities/1/unpublish/"));
    }

    #[test]
    fn test_date_filter() {
        assert_eq!(date_it("2025-05-29".to_string()), "29/05/2025");
        assert_eq!(date_it("ieri".to_string()), "ieri");
    }
}
