//! Postgres-backed [`TimeEntryLookup`] for the booking rules.

use async_trait::async_trait;
use sqlx::PgConnection;
use timeforing_core::time_entry::{DayEntry, TimeEntryLookup};
use timeforing_core::types::{DbId, EntryDate};

use crate::repositories::TimeEntryRepo;

/// Runs the validator's reads on the caller's transaction.
///
/// The project row is share-locked so it cannot be deactivated before the
/// write lands, and the (owner, date) pair is serialised with a
/// transaction-scoped advisory lock so two concurrent bookings cannot both
/// pass the daily total.
pub struct PgTimeEntryLookup<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgTimeEntryLookup<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> TimeEntryLookup for PgTimeEntryLookup<'c> {
    type Error = sqlx::Error;

    async fn active_project_exists(
        &mut self,
        project_id: DbId,
        owner_sub: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM projects WHERE id = $1 AND owner_sub = $2 AND aktiv FOR SHARE",
        )
        .bind(project_id)
        .bind(owner_sub)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row.is_some())
    }

    async fn entries_on(
        &mut self,
        owner_sub: &str,
        date: EntryDate,
    ) -> Result<Vec<DayEntry>, sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1 || '/' || $2::TEXT, 0))")
            .bind(owner_sub)
            .bind(date)
            .execute(&mut *self.conn)
            .await?;
        TimeEntryRepo::entries_on(&mut *self.conn, owner_sub, date).await
    }
}
