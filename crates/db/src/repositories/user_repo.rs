//! Repository for the `users` table.

use sqlx::PgExecutor;
use timeforing_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, navn, mobil, epost, version, created_at, updated_at";

/// Provides CRUD operations for users. Soft-deleted users are invisible.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (navn, mobil, epost)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.navn)
            .bind(&input.mobil)
            .bind(&input.epost)
            .fetch_one(executor)
            .await
    }

    /// Find a live user by internal ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND NOT deleted");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Whether a live user other than `except` already uses `epost`.
    pub async fn epost_taken<'e>(
        executor: impl PgExecutor<'e>,
        epost: &str,
        except: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM users
                WHERE LOWER(epost) = LOWER($1)
                  AND NOT deleted
                  AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(epost)
        .bind(except)
        .fetch_one(executor)
        .await?;
        Ok(taken)
    }

    /// List live users, most recently created first.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE NOT deleted
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    /// Replace the profile fields if `input.version` is still current.
    ///
    /// Returns `None` when the user is gone or the version has moved on; the
    /// caller tells the two apart.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                navn = $2,
                mobil = $3,
                epost = $4,
                version = version + 1
             WHERE id = $1 AND version = $5 AND NOT deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.navn)
            .bind(&input.mobil)
            .bind(&input.epost)
            .bind(input.version)
            .fetch_optional(executor)
            .await
    }

    /// Soft-delete a user. Returns `true` if a live row was marked deleted.
    pub async fn soft_delete<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET deleted = TRUE, version = version + 1
             WHERE id = $1 AND NOT deleted",
        )
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
