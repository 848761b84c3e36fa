//! One-shot confirmation notices carried across a redirect in a cookie.

use axum::http::HeaderMap;
use serde::Serialize;

use crate::shared::constants::NOTICE_COOKIE;
use crate::shared::cookies::read_cookie;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
}

impl NoticeLevel {
    fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(NoticeLevel::Success),
            "warning" => Some(NoticeLevel::Warning),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Pending notice of the request, if any
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let raw = read_cookie(headers, NOTICE_COOKIE)?;
        let (level, message) = raw.split_once(':')?;
        let level = NoticeLevel::parse(level)?;
        let message = urlencoding::decode(message).ok()?.into_owned();
        Some(Self { level, message })
    }

    /// `Set-Cookie` value storing this notice until the next page view
    pub fn set_cookie(&self, path: &str) -> String {
        format!(
            "{}={}:{}; Path={}; Max-Age=300; HttpOnly; SameSite=Lax",
            NOTICE_COOKIE,
            self.level.as_str(),
            urlencoding::encode(&self.message),
            path
        )
    }

    /// `Set-Cookie` value discarding a displayed notice
    pub fn clear_cookie(path: &str) -> String {
        format!(
            "{}=; Path={}; Max-Age=0; HttpOnly; SameSite=Lax",
            NOTICE_COOKIE, path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    #[test]
    fn test_notice_survives_cookie() {
        let notice = Notice::warning("Hai nascosto la segnalazione Bar Roma (test)");
        let set_cookie = notice.set_cookie("/");
        let pair = set_cookie.split(';').next().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());

        assert_eq!(Notice::from_headers(&headers), Some(notice));
    }

    #[test]
    fn test_unknown_level_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("djeography_notice=error:boom"),
        );
        assert_eq!(Notice::from_headers(&headers), None);
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert!(Notice::clear_cookie("/map").contains("Max-Age=0"));
        assert!(Notice::clear_cookie("/map").contains("Path=/map"));
    }
}
