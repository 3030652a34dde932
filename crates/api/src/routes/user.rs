//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /register       -> register
/// GET    /check-email    -> check_email
/// GET    /profile        -> get_profile
/// PUT    /profile        -> update_profile
/// DELETE /profile        -> delete_profile
/// GET    /               -> list (admin)
/// GET    /{id}           -> get_by_id (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list))
        .route("/register", post(user::register))
        .route("/check-email", get(user::check_email))
        .route(
            "/profile",
            get(user::get_profile)
                .put(user::update_profile)
                .delete(user::delete_profile),
        )
        .route("/{id}", get(user::get_by_id))
}
