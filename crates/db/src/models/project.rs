//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use timeforing_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    #[serde(rename = "projectId")]
    pub id: DbId,
    #[serde(skip)]
    pub owner_sub: String,
    pub navn: String,
    pub beskrivelse: Option<String>,
    pub aktiv: bool,
    #[serde(rename = "opprettetDato")]
    pub created_at: Timestamp,
    #[serde(rename = "endretDato")]
    pub updated_at: Timestamp,
}

/// Values for a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub owner_sub: String,
    pub navn: String,
    pub beskrivelse: Option<String>,
}

/// Replacement values for a project's name and description.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub navn: String,
    pub beskrivelse: Option<String>,
}

/// One page of an owner's active projects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}
