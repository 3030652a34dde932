//! Request extractors and response middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireUser`] -- Requires the user or admin role.
//! - [`rbac::RequireAdmin`] -- Requires the admin role.
//! - [`error_path::fill_error_path`] -- Writes the request path into error bodies.

pub mod auth;
pub mod error_path;
pub mod rbac;
