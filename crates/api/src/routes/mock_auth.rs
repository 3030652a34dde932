use axum::routing::post;
use axum::Router;

use crate::handlers::mock_auth;
use crate::state::AppState;

/// Routes mounted at `/mock-auth`. Development only.
pub fn router() -> Router<AppState> {
    Router::new().route("/token", post(mock_auth::token))
}
