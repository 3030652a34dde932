//! Domain error type shared by all crates.

use crate::time_entry::TimeEntryRejection;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A time entry broke one of the booking rules.
    #[error(transparent)]
    TimeEntry(#[from] TimeEntryRejection),

    /// Another non-deleted user already owns this e-mail address.
    #[error("Duplicate e-mail: {0}")]
    DuplicateEmail(String),

    /// A project cannot be deactivated while time entries reference it.
    #[error("Project {id} has registered time entries")]
    ProjectHasTimeEntries { id: DbId },

    /// The row was modified since the caller read it.
    #[error("Version conflict on {entity} with id {id}")]
    VersionConflict { entity: &'static str, id: DbId },
}
