//! Repository for the `projects` table.
//!
//! Every query is scoped to the owning subject; a project owned by someone
//! else behaves exactly like a missing one.

use sqlx::PgExecutor;
use timeforing_core::project::{PageRequest, ProjectSort};
use timeforing_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_sub, navn, beskrivelse, aktiv, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new active project, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_sub, navn, beskrivelse)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.owner_sub)
            .bind(&input.navn)
            .bind(&input.beskrivelse)
            .fetch_one(executor)
            .await
    }

    /// Find an active project owned by `owner_sub`.
    pub async fn find_active<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        owner_sub: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_sub = $2 AND aktiv"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_sub)
            .fetch_optional(executor)
            .await
    }

    /// Like [`find_active`](Self::find_active) but row-locks the project for
    /// the rest of the transaction.
    pub async fn find_active_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        owner_sub: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE id = $1 AND owner_sub = $2 AND aktiv
             FOR UPDATE"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_sub)
            .fetch_optional(executor)
            .await
    }

    /// One page of the owner's active projects.
    pub async fn list_active<'e>(
        executor: impl PgExecutor<'e>,
        owner_sub: &str,
        sort: ProjectSort,
        asc: bool,
        page: PageRequest,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let direction = if asc { "ASC" } else { "DESC" };
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE owner_sub = $1 AND aktiv
             ORDER BY {column} {direction}, id {direction}
             LIMIT $2 OFFSET $3",
            column = sort.column(),
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_sub)
            .bind(page.page_size)
            .bind(page.offset())
            .fetch_all(executor)
            .await
    }

    /// Number of the owner's active projects.
    pub async fn count_active<'e>(
        executor: impl PgExecutor<'e>,
        owner_sub: &str,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_sub = $1 AND aktiv")
                .bind(owner_sub)
                .fetch_one(executor)
                .await?;
        Ok(count)
    }

    /// Replace name and description of an active project.
    ///
    /// Returns `None` if no such project exists for the owner.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        owner_sub: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                navn = $3,
                beskrivelse = $4
             WHERE id = $1 AND owner_sub = $2 AND aktiv
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(owner_sub)
            .bind(&input.navn)
            .bind(&input.beskrivelse)
            .fetch_optional(executor)
            .await
    }

    /// Whether any time entry references the project.
    pub async fn has_time_entries<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM time_entries WHERE project_id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    /// Soft-delete a project. Returns `true` if an active row was deactivated.
    pub async fn soft_delete<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        owner_sub: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET aktiv = FALSE WHERE id = $1 AND owner_sub = $2 AND aktiv",
        )
        .bind(id)
        .bind(owner_sub)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
