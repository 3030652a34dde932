pub mod health;
pub mod mock_auth;
pub mod project;
pub mod report;
pub mod time_entry;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/register                   register (public)
/// /users/check-email                e-mail availability (public)
/// /users/profile                    get, update, delete own profile
/// /users                            list (admin only)
/// /users/{id}                       get (admin only)
///
/// /projects                         list, create
/// /projects/{id}                    get, update, delete
///
/// /time-entries                     list, create
/// /time-entries/{id}                get, update, delete
///
/// /reports/excel                    spreadsheet export
///
/// /mock-auth/token                  token issuance (when enabled)
/// ```
pub fn api_routes(mock_auth_enabled: bool) -> Router<AppState> {
    let routes = Router::new()
        .nest("/users", user::router())
        .nest("/projects", project::router())
        .nest("/time-entries", time_entry::router())
        .nest("/reports", report::router());

    if mock_auth_enabled {
        routes.nest("/mock-auth", mock_auth::router())
    } else {
        routes
    }
}
