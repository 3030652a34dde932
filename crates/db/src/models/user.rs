//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use timeforing_core::types::{DbId, Timestamp};

/// A user row from the `users` table. Soft-deleted rows are never loaded.
///
/// Use [`UserResponse`] for API output; it carries the wire field names.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub navn: String,
    pub mobil: String,
    pub epost: String,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The JWT subject that identifies this user.
    pub fn subject(&self) -> String {
        self.id.to_string()
    }
}

/// User representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Rendered as a string; it doubles as the user's JWT subject.
    pub id: String,
    pub navn: String,
    pub mobil: String,
    pub epost: String,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.subject(),
            navn: user.navn,
            mobil: user.mobil,
            epost: user.epost,
            version: user.version,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Values for a new user. Contact fields must already be normalised.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub navn: String,
    pub mobil: String,
    pub epost: String,
}

/// Full replacement of the mutable profile fields, guarded by `version`.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub navn: String,
    pub mobil: String,
    pub epost: String,
    /// Version the caller read; the update only applies if it still matches.
    pub version: i64,
}
