//! Visibility-scoped report queries.
//!
//! Every read of reports goes through [`EntityQuery`]: anonymous callers get
//! the published-only preset, authenticated callers see everything. On top of
//! that come the list filters, or the free-text search which replaces them.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::shared::validation::contains_pattern;

const SUMMARY_SELECT: &str = r#"
SELECT e.id, e.title, e.description, e.published, e.category_id,
       c.name AS category_name, c.icon AS category_icon, c.slug AS category_slug,
       e.evaluation_id, ev.full_name AS evaluation_name, ev.color AS evaluation_color,
       MAX(t.date_added) AS latest_update,
       COUNT(DISTINCT t.id) AS n_testimonials
FROM entities e
JOIN categories c ON c.id = e.category_id
LEFT JOIN evaluation_levels ev ON ev.short_name = e.evaluation_id
LEFT JOIN testimonials t ON t.entity_id = e.id
WHERE TRUE"#;

const COUNT_SELECT: &str = r#"
SELECT COUNT(*)
FROM entities e
JOIN categories c ON c.id = e.category_id
WHERE TRUE"#;

const GROUP_BY: &str = " GROUP BY e.id, c.id, ev.short_name";

/// Unpublished first, then most recently updated, then oldest
const ORDER_BY: &str = " ORDER BY e.published ASC, latest_update DESC NULLS LAST, e.id ASC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    PublishedOnly,
}

impl Visibility {
    pub fn for_user(authenticated: bool) -> Self {
        if authenticated {
            Visibility::All
        } else {
            Visibility::PublishedOnly
        }
    }
}

/// List filters as they arrive in the query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntityFilters {
    /// Province code of any of the report's addresses
    pub province: Option<String>,
    /// Category slug
    pub category: Option<String>,
    /// Evaluation level code
    pub evaluation: Option<String>,
    /// Case-insensitive match on title or address city; overrides the filters above
    pub search: Option<String>,
    /// Admin listing only; applied even while searching
    #[serde(skip)]
    pub published: Option<bool>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl EntityFilters {
    /// Blank parameters count as absent
    pub fn normalized(self) -> Self {
        Self {
            province: present(self.province),
            category: present(self.category),
            evaluation: present(self.evaluation),
            search: present(self.search),
            published: self.published,
        }
    }

    /// True when any filter or a search term is set
    pub fn is_searching(&self) -> bool {
        self.province.is_some()
            || self.category.is_some()
            || self.evaluation.is_some()
            || self.search.is_some()
    }

    /// Active parameters as `key=value&` pairs, for links that add `page=`
    pub fn query_string(&self) -> String {
        [
            ("search", &self.search),
            ("province", &self.province),
            ("category", &self.category),
            ("evaluation", &self.evaluation),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| format!("{}={}&", key, urlencoding::encode(v)))
        })
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EntityQuery {
    visibility: Visibility,
    filters: EntityFilters,
    id: Option<i64>,
}

impl EntityQuery {
    pub fn new(visibility: Visibility, filters: EntityFilters) -> Self {
        Self {
            visibility,
            filters: filters.normalized(),
            id: None,
        }
    }

    /// A single report, still subject to visibility
    pub fn by_id(visibility: Visibility, id: i64) -> Self {
        Self {
            visibility,
            filters: EntityFilters::default(),
            id: Some(id),
        }
    }

    pub fn filters(&self) -> &EntityFilters {
        &self.filters
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        if self.visibility == Visibility::PublishedOnly {
            qb.push(" AND e.published = TRUE");
        }

        if let Some(id) = self.id {
            qb.push(" AND e.id = ").push_bind(id);
        }

        if let Some(published) = self.filters.published {
            qb.push(" AND e.published = ").push_bind(published);
        }

        if let Some(search) = &self.filters.search {
            let pattern = contains_pattern(search);
            qb.push(" AND (e.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR EXISTS (SELECT 1 FROM addresses a WHERE a.entity_id = e.id AND a.city ILIKE ")
                .push_bind(pattern)
                .push("))");
            return;
        }

        if let Some(province) = &self.filters.province {
            qb.push(" AND EXISTS (SELECT 1 FROM addresses a WHERE a.entity_id = e.id AND a.province = ")
                .push_bind(province.clone())
                .push(")");
        }
        if let Some(category) = &self.filters.category {
            qb.push(" AND c.slug = ").push_bind(category.clone());
        }
        if let Some(evaluation) = &self.filters.evaluation {
            qb.push(" AND e.evaluation_id = ").push_bind(evaluation.clone());
        }
    }

    /// One page of annotated, ordered rows
    pub fn list_builder(&self, limit: i64, offset: i64) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(SUMMARY_SELECT);
        self.push_conditions(&mut qb);
        qb.push(GROUP_BY);
        qb.push(ORDER_BY);
        qb.push(" LIMIT ").push_bind(limit);
        qb.push(" OFFSET ").push_bind(offset);
        qb
    }

    /// Number of rows [`Self::list_builder`] pages through
    pub fn count_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(COUNT_SELECT);
        self.push_conditions(&mut qb);
        qb
    }

    /// Annotated row of a [`Self::by_id`] query
    pub fn single_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(SUMMARY_SELECT);
        self.push_conditions(&mut qb);
        qb.push(GROUP_BY);
        qb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(province: &str, category: &str, evaluation: &str, search: &str) -> EntityFilters {
        EntityFilters {
            province: Some(province.to_string()),
            category: Some(category.to_string()),
            evaluation: Some(evaluation.to_string()),
            search: Some(search.to_string()),
            published: None,
        }
    }

    #[test]
    fn test_published_only_preset() {
        let anonymous = EntityQuery::new(Visibility::PublishedOnly, EntityFilters::default());
        assert!(anonymous.list_builder(6, 0).sql().contains("e.published = TRUE"));
        assert!(anonymous.count_builder().sql().contains("e.published = TRUE"));

        let user = EntityQuery::new(Visibility::All, EntityFilters::default());
        assert!(!user.list_builder(6, 0).sql().contains("e.published = TRUE"));
    }

    #[test]
    fn test_search_ignores_filters() {
        let query = EntityQuery::new(Visibility::All, filters("PI", "bar", "NEG", "pisa"));
        let sql = query.list_builder(6, 0).sql().to_string();
        assert!(sql.contains("e.title ILIKE"));
        assert!(sql.contains("a.city ILIKE"));
        assert!(!sql.contains("a.province ="));
        assert!(!sql.contains("c.slug ="));
        assert!(!sql.contains("e.evaluation_id ="));
    }

    #[test]
    fn test_filters_without_search() {
        let query = EntityQuery::new(Visibility::All, filters("PI", "bar", "NEG", "  "));
        let sql = query.count_builder().sql().to_string();
        assert!(sql.contains("a.province = $1"));
        assert!(sql.contains("c.slug = $2"));
        assert!(sql.contains("e.evaluation_id = $3"));
        assert!(!sql.contains("ILIKE"));
    }

    #[test]
    fn test_ordering() {
        let sql = EntityQuery::new(Visibility::All, EntityFilters::default())
            .list_builder(6, 12)
            .sql()
            .to_string();
        assert!(sql.contains(
            "ORDER BY e.published ASC, latest_update DESC NULLS LAST, e.id ASC"
        ));
        assert!(sql.trim_end().ends_with("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_single_respects_visibility() {
        let sql = EntityQuery::by_id(Visibility::PublishedOnly, 3)
            .single_builder()
            .sql()
            .to_string();
        assert!(sql.contains("e.published = TRUE"));
        assert!(sql.contains("e.id = $1"));
    }

    #[test]
    fn test_searching_flag() {
        assert!(!EntityFilters::default().is_searching());
        let only_published = EntityFilters {
            published: Some(true),
            ..Default::default()
        };
        assert!(!only_published.is_searching());
        let blank = EntityFilters {
            search: Some(" ".to_string()),
            ..Default::default()
        }
        .normalized();
        assert!(!blank.is_searching());
        assert!(filters("PI", "", "", "").normalized().is_searching());
    }

    #[test]
    fn test_query_string_keeps_filters() {
        let filters = EntityFilters {
            province: Some("PI".to_string()),
            search: Some("san giuliano".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.query_string(), "search=san%20giuliano&province=PI&");
        assert_eq!(EntityFilters::default().query_string(), "");
    }
}
