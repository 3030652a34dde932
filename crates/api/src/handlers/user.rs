//! Handlers for registration, the caller's own profile, and admin lookups.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use timeforing_core::contact::{normalize_epost, normalize_mobil};
use timeforing_core::error::CoreError;
use timeforing_core::types::DbId;
use timeforing_db::models::user::{CreateUser, UpdateUser, UserResponse};
use timeforing_db::repositories::UserRepo;
use validator::Validate;

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::middleware::rbac::{RequireAdmin, RequireUser};
use crate::query::PaginationParams;
use crate::state::AppState;

/// Body of `POST /api/users/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "crate::validation::validate_navn"))]
    pub navn: String,
    #[validate(custom(function = "crate::validation::validate_mobil"))]
    pub mobil: String,
    #[validate(
        email(message = "Ugyldig e-postadresse"),
        length(max = 255, message = "E-post kan være maks 255 tegn")
    )]
    pub epost: String,
}

/// Body of `PUT /api/users/profile`. Omitted fields keep their value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "crate::validation::validate_navn"))]
    pub navn: Option<String>,
    #[validate(custom(function = "crate::validation::validate_mobil"))]
    pub mobil: Option<String>,
    #[validate(
        email(message = "Ugyldig e-postadresse"),
        length(max = 255, message = "E-post kan være maks 255 tegn")
    )]
    pub epost: Option<String>,
    /// Version the client last saw; defaults to the stored one.
    pub version: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CheckEmailParams {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailAvailability {
    pub available: bool,
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// POST /api/users/register
pub async fn register(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let epost = normalize_epost(&input.epost);

    let mut tx = state.pool.begin().await?;
    if UserRepo::epost_taken(&mut *tx, &epost, None).await? {
        tracing::info!(correlation_id = %ctx.correlation_id, "Registration with taken e-mail");
        return Err(CoreError::DuplicateEmail(epost).into());
    }

    let create = CreateUser {
        navn: input.navn.trim().to_string(),
        mobil: normalize_mobil(&input.mobil),
        epost,
    };
    let user = UserRepo::create(&mut *tx, &create).await?;
    tx.commit().await?;

    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_id = user.id,
        "User registered"
    );
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users/check-email?email=
pub async fn check_email(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CheckEmailParams>,
) -> AppResult<Json<EmailAvailability>> {
    let email = params
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Parameteren email må oppgis".into()))?;

    let taken = UserRepo::epost_taken(&state.pool, &normalize_epost(&email), None).await?;
    Ok(Json(EmailAvailability { available: !taken }))
}

/// GET /api/users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> AppResult<Json<UserResponse>> {
    let id = user.user_id()?;
    let found = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(found.into()))
}

/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
    ValidatedJson(input): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let id = user.user_id()?;

    let mut tx = state.pool.begin().await?;
    let current = UserRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    let epost = match input.epost.as_deref() {
        Some(e) => normalize_epost(e),
        None => current.epost.clone(),
    };
    if epost != current.epost && UserRepo::epost_taken(&mut *tx, &epost, Some(id)).await? {
        return Err(CoreError::DuplicateEmail(epost).into());
    }

    let update = UpdateUser {
        navn: input
            .navn
            .as_deref()
            .map(|n| n.trim().to_string())
            .unwrap_or(current.navn),
        mobil: input
            .mobil
            .as_deref()
            .map(normalize_mobil)
            .unwrap_or(current.mobil),
        epost,
        version: input.version.unwrap_or(current.version),
    };
    let updated = UserRepo::update(&mut *tx, id, &update)
        .await?
        .ok_or(CoreError::VersionConflict { entity: "User", id })?;
    tx.commit().await?;

    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_sub = %user.sub,
        version = updated.version,
        "Profile updated"
    );
    Ok(Json(updated.into()))
}

/// DELETE /api/users/profile
pub async fn delete_profile(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
) -> AppResult<StatusCode> {
    let id = user.user_id()?;
    if !UserRepo::soft_delete(&state.pool, id).await? {
        return Err(user_not_found(id));
    }
    tracing::info!(correlation_id = %ctx.correlation_id, user_sub = %user.sub, "Profile deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}
