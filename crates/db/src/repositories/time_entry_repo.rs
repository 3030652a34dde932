//! Repository for the `time_entries` table.

use sqlx::PgExecutor;
use timeforing_core::time_entry::DayEntry;
use timeforing_core::types::{DbId, EntryDate};

use crate::models::time_entry::{
    CreateTimeEntry, DateRange, TimeEntry, TimeEntryWithProject, UpdateTimeEntry,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, owner_sub, dato, timer, kommentar, version, created_at, updated_at";

/// Provides CRUD operations for time entries, always scoped to the owner.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Insert a new entry, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTimeEntry,
    ) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries (project_id, owner_sub, dato, timer, kommentar)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(input.project_id)
            .bind(&input.owner_sub)
            .bind(input.dato)
            .bind(input.timer)
            .bind(&input.kommentar)
            .fetch_one(executor)
            .await
    }

    /// Find one of the owner's entries by ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        owner_sub: &str,
    ) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_entries WHERE id = $1 AND owner_sub = $2");
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .bind(owner_sub)
            .fetch_optional(executor)
            .await
    }

    /// The owner's entries within `range`, newest date first.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        owner_sub: &str,
        range: DateRange,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE owner_sub = $1
               AND ($2::DATE IS NULL OR dato >= $2)
               AND ($3::DATE IS NULL OR dato <= $3)
             ORDER BY dato DESC, id DESC"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(owner_sub)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(executor)
            .await
    }

    /// Like [`list`](Self::list) but joined with each entry's project name.
    ///
    /// Entries on since-deactivated projects are included.
    pub async fn list_with_project<'e>(
        executor: impl PgExecutor<'e>,
        owner_sub: &str,
        range: DateRange,
    ) -> Result<Vec<TimeEntryWithProject>, sqlx::Error> {
        sqlx::query_as::<_, TimeEntryWithProject>(
            "SELECT t.id, t.project_id, p.navn AS project_navn, t.dato, t.timer, t.kommentar
             FROM time_entries t
             JOIN projects p ON p.id = t.project_id
             WHERE t.owner_sub = $1
               AND ($2::DATE IS NULL OR t.dato >= $2)
               AND ($3::DATE IS NULL OR t.dato <= $3)
             ORDER BY t.dato DESC, t.id DESC",
        )
        .bind(owner_sub)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(executor)
        .await
    }

    /// Id and hours of every entry the owner has on `dato`.
    pub async fn entries_on<'e>(
        executor: impl PgExecutor<'e>,
        owner_sub: &str,
        dato: EntryDate,
    ) -> Result<Vec<DayEntry>, sqlx::Error> {
        let rows: Vec<(DbId, f64)> = sqlx::query_as(
            "SELECT id, timer FROM time_entries WHERE owner_sub = $1 AND dato = $2",
        )
        .bind(owner_sub)
        .bind(dato)
        .fetch_all(executor)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, hours)| DayEntry { id, hours })
            .collect())
    }

    /// Replace an entry if `input.version` is still current.
    ///
    /// Returns `None` when the entry is gone or the version has moved on.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        owner_sub: &str,
        input: &UpdateTimeEntry,
    ) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE time_entries SET
                project_id = $3,
                dato = $4,
                timer = $5,
                kommentar = $6,
                version = version + 1
             WHERE id = $1 AND owner_sub = $2 AND version = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(id)
            .bind(owner_sub)
            .bind(input.project_id)
            .bind(input.dato)
            .bind(input.timer)
            .bind(&input.kommentar)
            .bind(input.version)
            .fetch_optional(executor)
            .await
    }

    /// Permanently delete one of the owner's entries.
    pub async fn delete<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        owner_sub: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = $1 AND owner_sub = $2")
            .bind(id)
            .bind(owner_sub)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
