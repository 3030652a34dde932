//! Listing rules for projects: sort keys and page clamping.

use crate::error::CoreError;

/// Default page size for project listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Column a project listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSort {
    #[default]
    Navn,
    OpprettetDato,
    EndretDato,
}

impl ProjectSort {
    /// Parse the wire name of a sort key. Unknown keys are a validation error.
    pub fn parse(key: &str) -> Result<Self, CoreError> {
        match key {
            "navn" => Ok(Self::Navn),
            "opprettetDato" | "opprettet_dato" => Ok(Self::OpprettetDato),
            "endretDato" | "endret_dato" => Ok(Self::EndretDato),
            other => Err(CoreError::Validation(format!(
                "Ugyldig sorteringsfelt: {other}"
            ))),
        }
    }

    /// The SQL column this key orders by.
    pub fn column(self) -> &'static str {
        match self {
            Self::Navn => "navn",
            Self::OpprettetDato => "created_at",
            Self::EndretDato => "updated_at",
        }
    }
}

/// A resolved page request (1-based page number).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Clamp raw query values: page >= 1, page size within `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the page. Saturates instead of overflowing on absurd
    /// page numbers; such a page is simply empty.
    pub fn offset(self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}
