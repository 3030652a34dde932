//! Local token issuance for development and tests.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use timeforing_core::roles::ROLE_USER;
use validator::Validate;

use crate::auth::jwt::{generate_token, TokenSubject};
use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

fn default_roles() -> Vec<String> {
    vec![ROLE_USER.to_string()]
}

/// Body of `POST /api/mock-auth/token`.
#[derive(Debug, Deserialize, Validate)]
pub struct MockTokenRequest {
    #[validate(length(min = 1, message = "sub er påkrevd"))]
    pub sub: String,
    #[validate(length(min = 1, message = "name er påkrevd"))]
    pub name: String,
    #[validate(length(min = 1, message = "email er påkrevd"))]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/mock-auth/token
pub async fn token(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<MockTokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let subject = TokenSubject {
        sub: input.sub,
        roles: input.roles,
        name: Some(input.name),
        email: Some(input.email),
        phone: input.phone,
    };
    let token = generate_token(&subject, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("token signing failed: {e}")))?;

    tracing::debug!(
        correlation_id = %ctx.correlation_id,
        user_sub = %subject.sub,
        "Issued mock token"
    );
    Ok(Json(TokenResponse { token }))
}
