/// Builds the public URLs of the pages, honoring the mount prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urls {
    base: String,
}

impl Urls {
    /// `base_path` is either empty or starts with `/`; a trailing slash is ignored.
    pub fn new(base_path: &str) -> Self {
        Self {
            base: base_path.trim_end_matches('/').to_string(),
        }
    }

    /// Path cookies are scoped to
    pub fn cookie_path(&self) -> String {
        if self.base.is_empty() {
            "/".to_string()
        } else {
            self.base.clone()
        }
    }

    pub fn list(&self) -> String {
        format!("{}/entities/", self.base)
    }

    pub fn detail(&self, entity_id: i64) -> String {
        format!("{}/entities/{}/", self.base, entity_id)
    }

    pub fn publish(&self, entity_id: i64) -> String {
        format!("{}/entities/{}/publish/", self.base, entity_id)
    }

    pub fn unpublish(&self, entity_id: i64) -> String {
        format!("{}/entities/{}/unpublish/", self.base, entity_id)
    }

    pub fn data(&self, category_slug: &str) -> String {
        format!("{}/data/{}.geojson", self.base, category_slug)
    }

    pub fn popup(&self, address_id: i64) -> String {
        format!("{}/popup/{}/", self.base, address_id)
    }

    pub fn fullscreen(&self) -> String {
        format!("{}/fullscreen/", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_without_prefix() {
        let urls = Urls::new("");
        assert_eq!(urls.list(), "/entities/");
        assert_eq!(urls.detail(3), "/entities/3/");
        assert_eq!(urls.data("test"), "/data/test.geojson");
        assert_eq!(urls.cookie_path(), "/");
    }

    #[test]
    fn test_urls_with_prefix() {
        let urls = Urls::new("/map/");
        assert_eq!(urls.publish(7), "/map/entities/7/publish/");
        assert_eq!(urls.unpublish(7), "/map/entities/7/unpublish/");
        assert_eq!(urls.popup(2), "/map/popup/2/");
        assert_eq!(urls.fullscreen(), "/map/fullscreen/");
        assert_eq!(urls.cookie_path(), "/map");
    }
}
