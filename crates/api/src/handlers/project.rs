//! Handlers for the `/projects` resource.
//!
//! Every operation is scoped to the caller's token subject.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use timeforing_core::error::CoreError;
use timeforing_core::project::{PageRequest, ProjectSort};
use timeforing_core::types::DbId;
use timeforing_db::models::project::{CreateProject, Project, ProjectPage, UpdateProject};
use timeforing_db::repositories::ProjectRepo;
use validator::Validate;

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::middleware::rbac::RequireUser;
use crate::state::AppState;

/// Body of project create and update.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(custom(function = "crate::validation::validate_navn"))]
    pub navn: String,
    #[validate(length(max = 500, message = "Beskrivelse kan være maks 500 tegn"))]
    pub beskrivelse: Option<String>,
}

impl ProjectRequest {
    fn navn(&self) -> String {
        self.navn.trim().to_string()
    }
}

/// Query of `GET /api/projects`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
    pub asc: Option<bool>,
}

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
    ValidatedJson(input): ValidatedJson<ProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let create = CreateProject {
        owner_sub: user.sub.clone(),
        navn: input.navn(),
        beskrivelse: input.beskrivelse,
    };
    let project = ProjectRepo::create(&state.pool, &create).await?;

    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_sub = %user.sub,
        project_id = project.id,
        "Project created"
    );
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects?page=&pageSize=&sort=&asc=
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiQuery(params): ApiQuery<ProjectListParams>,
) -> AppResult<Json<ProjectPage>> {
    let sort = match params.sort.as_deref() {
        Some(key) => ProjectSort::parse(key)?,
        None => ProjectSort::default(),
    };
    let page = PageRequest::new(params.page, params.page_size);
    let asc = params.asc.unwrap_or(true);

    let projects = ProjectRepo::list_active(&state.pool, &user.sub, sort, asc, page).await?;
    let total = ProjectRepo::count_active(&state.pool, &user.sub).await?;

    Ok(Json(ProjectPage {
        projects,
        page: page.page,
        page_size: page.page_size,
        total,
    }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_active(&state.pool, id, &user.sub)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<ProjectRequest>,
) -> AppResult<Json<Project>> {
    let update = UpdateProject {
        navn: input.navn(),
        beskrivelse: input.beskrivelse,
    };
    let project = ProjectRepo::update(&state.pool, id, &user.sub, &update)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_sub = %user.sub,
        project_id = id,
        "Project updated"
    );
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Soft delete; refused while time entries reference the project. The row
/// lock keeps a concurrent booking from slipping in between the check and
/// the update.
pub async fn delete(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;

    ProjectRepo::find_active_for_update(&mut *tx, id, &user.sub)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    if ProjectRepo::has_time_entries(&mut *tx, id).await? {
        tracing::info!(
            correlation_id = %ctx.correlation_id,
            user_sub = %user.sub,
            project_id = id,
            "Refused to delete project with time entries"
        );
        return Err(CoreError::ProjectHasTimeEntries { id }.into());
    }

    ProjectRepo::soft_delete(&mut *tx, id, &user.sub).await?;
    tx.commit().await?;

    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_sub = %user.sub,
        project_id = id,
        "Project deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
