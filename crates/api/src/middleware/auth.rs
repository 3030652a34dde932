//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use timeforing_core::error::CoreError;
use timeforing_core::report::Reporter;
use timeforing_core::roles::{ROLE_ADMIN, ROLE_USER};
use timeforing_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_sub = %user.sub, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Token subject; owns projects and time entries.
    pub sub: String,
    pub roles: Vec<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl AuthUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Whether the caller may use the regular user endpoints.
    pub fn is_user(&self) -> bool {
        self.has_role(ROLE_USER) || self.is_admin()
    }

    /// The registered user this subject refers to, if it is a user id.
    ///
    /// Subjects minted for people who never registered are not numeric, so
    /// their profile simply does not exist.
    pub fn user_id(&self) -> Result<DbId, AppError> {
        self.sub.parse().map_err(|_| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: 0,
            })
        })
    }

    /// Identity printed at the top of exported reports.
    pub fn reporter(&self) -> Reporter {
        Reporter {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Mangler Authorization-header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Ugyldig Authorization-format. Forventet: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Core(CoreError::Unauthorized("Ugyldig eller utløpt token".into()))
        })?;

        Ok(AuthUser {
            sub: claims.sub,
            roles: claims.roles,
            name: claims.name,
            email: claims.email,
        })
    }
}
