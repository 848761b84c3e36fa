use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// 302 redirect to `location`
pub fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!("Refusing to redirect to invalid location: {:?}", location);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// 302 redirect that also sets a cookie
pub fn found_with_cookie(location: &str, set_cookie: &str) -> Response {
    let mut response = found(location);
    if let Ok(value) = HeaderValue::from_str(set_cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Login URL carrying the page to come back to
pub fn login_redirect_location(login_url: &str, next: &str) -> String {
    let next = urlencoding::encode(next).replace("%2F", "/");
    let separator = if login_url.contains('?') { '&' } else { '?' };
    format!("{}{}next={}", login_url, separator, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_is_302() {
        let response = found("/entities/1/");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/entities/1/");
    }

    #[test]
    fn test_login_redirect_location() {
        assert_eq!(
            login_redirect_location("/accounts/login/", "/map/entities/4/publish/"),
            "/accounts/login/?next=/map/entities/4/publish/"
        );
        assert_eq!(
            login_redirect_location("https://sso.example.org/login?app=map", "/entities/4/publish/"),
            "https://sso.example.org/login?app=map&next=/entities/4/publish/"
        );
    }
}
