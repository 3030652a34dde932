//! Booking rules for time entries.
//!
//! [`validate`] runs the guard chain for a proposed entry. The first failing
//! rule wins:
//!
//! 1. hours must be positive
//! 2. hours must be whole or half
//! 3. at most [`MAX_HOURS_PER_ENTRY`] per entry
//! 4. the project must exist, be active and belong to the same owner
//! 5. the owner's total for the day must stay within [`MAX_HOURS_PER_DAY`]
//!
//! Rules 4 and 5 read through a [`TimeEntryLookup`] so the same chain runs
//! against Postgres inside a transaction or against an in-memory fake.

use async_trait::async_trait;
use serde::Serialize;

use crate::types::{DbId, EntryDate};

/// Upper bound for a single registration.
pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;

/// Upper bound for the sum of one owner's registrations on one day.
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// Why a proposed time entry was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeEntryRejection {
    #[error("Timer må være positiv verdi")]
    NonPositiveHours,

    #[error("Kun hele eller halve timer er tillatt")]
    InvalidStep,

    #[error("Maks 24 timer per registrering")]
    ExceedsEntryMax,

    #[error("Prosjekt ikke funnet eller ikke aktiv")]
    ProjectNotFoundOrInactive,

    #[error("Kan ikke registrere mer enn 24 timer på samme dag")]
    ExceedsDailyMax,
}

impl TimeEntryRejection {
    /// Stable machine-readable code exposed to API clients.
    pub fn code(self) -> &'static str {
        match self {
            Self::NonPositiveHours => "INVALID_TIMER_VALUE",
            Self::InvalidStep => "INVALID_TIMER_STEP",
            Self::ExceedsEntryMax => "MAX_HOURS_PER_ENTRY",
            Self::ProjectNotFoundOrInactive => "PROJECT_NOT_FOUND_OR_INACTIVE",
            Self::ExceedsDailyMax => "MAX_HOURS_PER_DAY",
        }
    }
}

/// A time entry as proposed by a create or update request.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// JWT subject of the user booking the time.
    pub owner_sub: String,
    pub project_id: DbId,
    pub date: EntryDate,
    pub hours: f64,
    /// Id of the entry being replaced, when updating.
    pub replacing: Option<DbId>,
}

/// An existing registration on the candidate's day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEntry {
    pub id: DbId,
    pub hours: f64,
}

/// Read-side collaborator used by the validator.
#[async_trait]
pub trait TimeEntryLookup: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether an active project with this id is owned by `owner_sub`.
    async fn active_project_exists(
        &mut self,
        project_id: DbId,
        owner_sub: &str,
    ) -> Result<bool, Self::Error>;

    /// All registrations `owner_sub` has on `date`.
    async fn entries_on(
        &mut self,
        owner_sub: &str,
        date: EntryDate,
    ) -> Result<Vec<DayEntry>, Self::Error>;
}

/// Failure of [`validate`]: either a rule rejected the entry, or the lookup
/// itself failed.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Rejected(#[from] TimeEntryRejection),

    #[error("time entry lookup failed: {0}")]
    Lookup(#[source] E),
}

/// Check the per-entry hour rules (1-3) without touching storage.
pub fn check_hours(hours: f64) -> Result<(), TimeEntryRejection> {
    // NaN fails this comparison too.
    if !(hours > 0.0) {
        return Err(TimeEntryRejection::NonPositiveHours);
    }
    if (hours * 2.0) % 1.0 != 0.0 {
        return Err(TimeEntryRejection::InvalidStep);
    }
    if hours > MAX_HOURS_PER_ENTRY {
        return Err(TimeEntryRejection::ExceedsEntryMax);
    }
    Ok(())
}

/// Check rule 5 given the day's existing registrations.
///
/// The entry named by `replacing` is left out of the sum so an update can
/// keep its own hours.
pub fn check_day_total(
    existing: &[DayEntry],
    replacing: Option<DbId>,
    hours: f64,
) -> Result<(), TimeEntryRejection> {
    let booked: f64 = existing
        .iter()
        .filter(|e| Some(e.id) != replacing)
        .map(|e| e.hours)
        .sum();
    if booked + hours > MAX_HOURS_PER_DAY {
        return Err(TimeEntryRejection::ExceedsDailyMax);
    }
    Ok(())
}

/// Run the full guard chain for `candidate`.
pub async fn validate<L: TimeEntryLookup>(
    lookup: &mut L,
    candidate: &Candidate,
) -> Result<(), ValidateError<L::Error>> {
    check_hours(candidate.hours)?;

    let project_ok = lookup
        .active_project_exists(candidate.project_id, &candidate.owner_sub)
        .await
        .map_err(ValidateError::Lookup)?;
    if !project_ok {
        return Err(TimeEntryRejection::ProjectNotFoundOrInactive.into());
    }

    let existing = lookup
        .entries_on(&candidate.owner_sub, candidate.date)
        .await
        .map_err(ValidateError::Lookup)?;
    check_day_total(&existing, candidate.replacing, candidate.hours)?;

    Ok(())
}
