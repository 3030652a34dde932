//! Time entry model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use timeforing_core::types::{DbId, EntryDate, Timestamp};

/// A row from the `time_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeEntry {
    #[serde(rename = "timeEntryId")]
    pub id: DbId,
    #[serde(rename = "prosjektId")]
    pub project_id: DbId,
    #[serde(skip)]
    pub owner_sub: String,
    pub dato: EntryDate,
    pub timer: f64,
    pub kommentar: Option<String>,
    pub version: i64,
    #[serde(rename = "opprettetDato")]
    pub created_at: Timestamp,
    #[serde(rename = "sistEndret")]
    pub updated_at: Timestamp,
}

/// Values for a new entry. Must have passed the booking rules.
#[derive(Debug, Clone)]
pub struct CreateTimeEntry {
    pub project_id: DbId,
    pub owner_sub: String,
    pub dato: EntryDate,
    pub timer: f64,
    pub kommentar: Option<String>,
}

/// Replacement values for an entry, guarded by `version`.
#[derive(Debug, Clone)]
pub struct UpdateTimeEntry {
    pub project_id: DbId,
    pub dato: EntryDate,
    pub timer: f64,
    pub kommentar: Option<String>,
    pub version: i64,
}

/// Optional inclusive date bounds for listing entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<EntryDate>,
    pub to: Option<EntryDate>,
}

/// An entry joined with its project's name, for reports.
#[derive(Debug, Clone, FromRow)]
pub struct TimeEntryWithProject {
    pub id: DbId,
    pub project_id: DbId,
    pub project_navn: String,
    pub dato: EntryDate,
    pub timer: f64,
    pub kommentar: Option<String>,
}
