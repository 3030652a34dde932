//! Handlers for the `/time-entries` resource.
//!
//! Create and update run the booking rules inside the same transaction as
//! the write, so the daily total they check is the one that gets committed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgConnection;
use timeforing_core::error::CoreError;
use timeforing_core::time_entry::{self, Candidate, ValidateError};
use timeforing_core::types::{DbId, EntryDate};
use timeforing_db::lookup::PgTimeEntryLookup;
use timeforing_db::models::time_entry::{CreateTimeEntry, DateRange, TimeEntry, UpdateTimeEntry};
use timeforing_db::repositories::TimeEntryRepo;
use validator::Validate;

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::middleware::rbac::RequireUser;
use crate::query::DateRangeParams;
use crate::state::AppState;

/// Body of time entry create and update.
#[derive(Debug, Deserialize, Validate)]
pub struct TimeEntryRequest {
    #[serde(rename = "prosjektId")]
    pub project_id: DbId,
    pub dato: EntryDate,
    pub timer: f64,
    #[validate(length(max = 500, message = "Kommentar kan være maks 500 tegn"))]
    pub kommentar: Option<String>,
    /// Version the client last saw (updates only); defaults to the stored one.
    pub version: Option<i64>,
}

impl TimeEntryRequest {
    fn candidate(&self, owner_sub: &str, replacing: Option<DbId>) -> Candidate {
        Candidate {
            owner_sub: owner_sub.to_string(),
            project_id: self.project_id,
            date: self.dato,
            hours: self.timer,
            replacing,
        }
    }
}

fn time_entry_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "TimeEntry",
        id,
    })
}

/// Run the booking rules on `conn`, logging rejections.
async fn check_rules(
    conn: &mut PgConnection,
    candidate: &Candidate,
    ctx: &RequestContext,
) -> AppResult<()> {
    let mut lookup = PgTimeEntryLookup::new(conn);
    match time_entry::validate(&mut lookup, candidate).await {
        Ok(()) => Ok(()),
        Err(err) => {
            if let ValidateError::Rejected(rejection) = &err {
                tracing::info!(
                    correlation_id = %ctx.correlation_id,
                    user_sub = %candidate.owner_sub,
                    project_id = candidate.project_id,
                    code = rejection.code(),
                    "Time entry rejected"
                );
            }
            Err(err.into())
        }
    }
}

/// POST /api/time-entries
pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
    ValidatedJson(input): ValidatedJson<TimeEntryRequest>,
) -> AppResult<(StatusCode, Json<TimeEntry>)> {
    let mut tx = state.pool.begin().await?;
    check_rules(&mut tx, &input.candidate(&user.sub, None), &ctx).await?;

    let create = CreateTimeEntry {
        project_id: input.project_id,
        owner_sub: user.sub.clone(),
        dato: input.dato,
        timer: input.timer,
        kommentar: input.kommentar,
    };
    let entry = TimeEntryRepo::create(&mut *tx, &create).await?;
    tx.commit().await?;

    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_sub = %user.sub,
        time_entry_id = entry.id,
        timer = entry.timer,
        "Time entry created"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/time-entries?from=&to=
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiQuery(params): ApiQuery<DateRangeParams>,
) -> AppResult<Json<Vec<TimeEntry>>> {
    let range = DateRange::from(params);
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::BadRequest("from kan ikke være etter to".into()));
        }
    }
    let entries = TimeEntryRepo::list(&state.pool, &user.sub, range).await?;
    Ok(Json(entries))
}

/// GET /api/time-entries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<TimeEntry>> {
    let entry = TimeEntryRepo::find_by_id(&state.pool, id, &user.sub)
        .await?
        .ok_or_else(|| time_entry_not_found(id))?;
    Ok(Json(entry))
}

/// PUT /api/time-entries/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<TimeEntryRequest>,
) -> AppResult<Json<TimeEntry>> {
    let mut tx = state.pool.begin().await?;

    let current = TimeEntryRepo::find_by_id(&mut *tx, id, &user.sub)
        .await?
        .ok_or_else(|| time_entry_not_found(id))?;
    let version = input.version.unwrap_or(current.version);
    if version != current.version {
        return Err(CoreError::VersionConflict {
            entity: "TimeEntry",
            id,
        }
        .into());
    }

    check_rules(&mut tx, &input.candidate(&user.sub, Some(id)), &ctx).await?;

    let update = UpdateTimeEntry {
        project_id: input.project_id,
        dato: input.dato,
        timer: input.timer,
        kommentar: input.kommentar,
        version,
    };
    let entry = TimeEntryRepo::update(&mut *tx, id, &user.sub, &update)
        .await?
        .ok_or(CoreError::VersionConflict {
            entity: "TimeEntry",
            id,
        })?;
    tx.commit().await?;

    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_sub = %user.sub,
        time_entry_id = id,
        version = entry.version,
        "Time entry updated"
    );
    Ok(Json(entry))
}

/// DELETE /api/time-entries/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if !TimeEntryRepo::delete(&state.pool, id, &user.sub).await? {
        return Err(time_entry_not_found(id));
    }
    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_sub = %user.sub,
        time_entry_id = id,
        "Time entry deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
