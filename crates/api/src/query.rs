//! Shared query parameter types for API handlers.

use serde::Deserialize;
use timeforing_core::types::EntryDate;
use timeforing_db::models::time_entry::DateRange;

/// Default page size for `?limit=&offset=` listings.
pub const DEFAULT_LIMIT: i64 = 50;
/// Largest accepted `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Optional inclusive `?from=&to=` date bounds (`YYYY-MM-DD`).
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeParams {
    pub from: Option<EntryDate>,
    pub to: Option<EntryDate>,
}

impl From<DateRangeParams> for DateRange {
    fn from(params: DateRangeParams) -> Self {
        DateRange {
            from: params.from,
            to: params.to,
        }
    }
}
