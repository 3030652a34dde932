//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose roles do not
//! meet the requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use timeforing_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `timeforingapp::USER` or `timeforingapp::ADMIN`. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn mine(RequireUser(user): RequireUser) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireUser(pub AuthUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_user() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Brukerrolle kreves".into(),
            )));
        }
        Ok(RequireUser(user))
    }
}

/// Requires `timeforingapp::ADMIN`. Rejects with 403 otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Administratorrolle kreves".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
