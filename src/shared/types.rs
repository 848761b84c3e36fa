use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::AppError;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

// =============================================================================
// API PAGINATION
// =============================================================================

/// Offset pagination for the admin API list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 20, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

// =============================================================================
// PAGE PAGINATION
// =============================================================================

/// One page of a server-rendered list.
///
/// An empty list still has a first page. A `page` parameter that is not a
/// number (other than `last`) or lies outside `1..=num_pages` is a not-found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub per_page: i64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<i64>,
    pub next_page_number: Option<i64>,
    /// True when the items do not fit on a single page
    pub is_paginated: bool,
}

impl PageInfo {
    pub fn resolve(requested: Option<&str>, count: i64, per_page: i64) -> Result<Self, AppError> {
        let per_page = per_page.max(1);
        let num_pages = if count <= 0 {
            1
        } else {
            (count - 1) / per_page + 1
        };

        let number = match requested.map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::NotFound(format!("Invalid page '{}'", raw)))?,
        };

        if number < 1 || number > num_pages {
            return Err(AppError::NotFound(format!("Page {} does not exist", number)));
        }

        Ok(Self {
            number,
            num_pages,
            count,
            per_page,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
            is_paginated: count > per_page,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}
