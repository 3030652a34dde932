//! Route definitions for the `/time-entries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::time_entry;
use crate::state::AppState;

/// Routes mounted at `/time-entries`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(time_entry::list).post(time_entry::create))
        .route(
            "/{id}",
            get(time_entry::get_by_id)
                .put(time_entry::update)
                .delete(time_entry::delete),
        )
}
