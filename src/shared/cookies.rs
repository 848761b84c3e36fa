use axum::http::{header, HeaderMap};

/// Value of the first cookie named `name` in the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("a=1; djeography_session=abc.def; b=2"),
        );
        assert_eq!(
            read_cookie(&headers, "djeography_session"),
            Some("abc.def".to_string())
        );
        assert_eq!(read_cookie(&headers, "b"), Some("2".to_string()));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));
        assert_eq!(read_cookie(&headers, "b"), Some("2".to_string()));
    }
}
