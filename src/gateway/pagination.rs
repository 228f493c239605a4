//! Pagination arithmetic.
//!
//! Callers supply `page` and `limit` with per-endpoint defaults; values are
//! used as given, without clamping. A `page` of 0 or below produces a
//! negative offset that the database rejects at execution time, reproducing
//! the lenient contract of the existing callers. Integer math cannot express
//! `total / 0`, so `limit <= 0` yields zero total pages.

use serde::{Deserialize, Serialize};

/// Default page number when the caller omits `page`.
pub const DEFAULT_PAGE: i64 = 1;
/// Default `limit` for the table listing endpoint.
pub const DEFAULT_TABLES_LIMIT: i64 = 50;
/// Default `limit` for the row listing endpoint.
pub const DEFAULT_ROWS_LIMIT: i64 = 100;

/// Pagination descriptor attached to paginated responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Compute the pagination descriptor for `(page, limit, total)`.
pub fn paginate(page: i64, limit: i64, total: i64) -> Pagination {
    let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
    Pagination {
        total,
        page,
        limit,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}

/// Row offset for a page: `(page - 1) * limit`, faithfully signed.
pub fn offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Query-string paging parameters shared by the paginated endpoints.
///
/// `limit` stays optional here because the listing endpoints declare
/// different defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    pub limit: Option<i64>,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}
