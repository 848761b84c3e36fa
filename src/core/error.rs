use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::templates::TemplateError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Status code and client-facing message; template and internal failures are logged here
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            // Logged with context where the query failed
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error occurred".to_string(),
            ),
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let errors = match self {
            AppError::Validation(ref msg) => Some(vec![msg.clone()]),
            _ => None,
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

/// Error of a server-rendered page.
///
/// Same mapping as [`AppError`], rendered as a short HTML document instead of
/// the JSON envelope. Not-found pages never say whether the record exists.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<TemplateError> for PageError {
    fn from(e: TemplateError) -> Self {
        Self(AppError::Template(e))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, _) = self.0.status_and_message();
        let title = match status {
            StatusCode::NOT_FOUND => "Pagina non trovata",
            StatusCode::BAD_REQUEST => "Richiesta non valida",
            _ => "Errore del server",
        };
        let body = format!(
            "<!doctype html><html lang=\"it\"><head><meta charset=\"utf-8\"><title>{title}</title></head>\
             <body><h1>{code} - {title}</h1></body></html>",
            code = status.as_u16(),
            title = title
        );

        (status, Html(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_statuses() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_database_error_hides_details() {
        let (status, message) = AppError::Database(sqlx::Error::RowNotFound).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Database error occurred");
    }

    #[test]
    fn test_page_error_is_html_not_found() {
        let response = PageError(AppError::NotFound("Entity 3 not found".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
