use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use timeforing_core::error::CoreError;
use timeforing_core::time_entry::{TimeEntryRejection, ValidateError};
use timeforing_core::types::Timestamp;

/// Message returned for every 500, whatever the cause.
pub const INTERNAL_MESSAGE: &str = "Noe gikk galt, prøv igjen senere";

/// Unique index that keeps e-mail addresses distinct among live users.
const EPOST_UNIQUE_CONSTRAINT: &str = "uq_users_epost";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `timeforing_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body failed field validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidateError<sqlx::Error>> for AppError {
    fn from(err: ValidateError<sqlx::Error>) -> Self {
        match err {
            ValidateError::Rejected(rejection) => AppError::Core(CoreError::TimeEntry(rejection)),
            ValidateError::Lookup(db) => AppError::Database(db),
        }
    }
}

/// JSON body of every error response.
///
/// A copy is stored in the response extensions so
/// [`fill_error_path`](crate::middleware::error_path::fill_error_path) can
/// re-render it with the request path.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
    pub status: u16,
    pub timestamp: Timestamp,
    pub path: String,
    /// Field name to message, for request validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut errors = None;
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::Validation(validation) => {
                errors = Some(field_messages(validation));
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Valideringsfeil".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = ErrorBody {
            message,
            code,
            status: status.as_u16(),
            timestamp: chrono::Utc::now(),
            path: String::new(),
            errors,
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => match *entity {
            "User" => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                "Bruker ikke funnet".to_string(),
            ),
            "Project" => (
                StatusCode::NOT_FOUND,
                "PROJECT_NOT_FOUND",
                "Prosjekt ikke funnet".to_string(),
            ),
            "TimeEntry" => (
                StatusCode::NOT_FOUND,
                "TIME_ENTRY_NOT_FOUND",
                "Timeføring ikke funnet".to_string(),
            ),
            other => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{other} med id {id} ikke funnet"),
            ),
        },
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::TimeEntry(rejection) => {
            (rejection_status(*rejection), rejection.code(), rejection.to_string())
        }
        CoreError::DuplicateEmail(_) => (
            StatusCode::CONFLICT,
            "DUPLICATE_EMAIL",
            "Epost addressen er allerede registrert".to_string(),
        ),
        CoreError::ProjectHasTimeEntries { .. } => (
            StatusCode::CONFLICT,
            "PROJECT_HAS_TIME_ENTRIES",
            "Kan ikke slette prosjekt med registrerte timer".to_string(),
        ),
        CoreError::VersionConflict { .. } => (
            StatusCode::CONFLICT,
            "VERSION_CONFLICT",
            "Dataene er endret av noen andre, last inn på nytt".to_string(),
        ),
    }
}

fn rejection_status(rejection: TimeEntryRejection) -> StatusCode {
    match rejection {
        TimeEntryRejection::NonPositiveHours
        | TimeEntryRejection::InvalidStep
        | TimeEntryRejection::ExceedsEntryMax => StatusCode::BAD_REQUEST,
        TimeEntryRejection::ProjectNotFoundOrInactive => StatusCode::NOT_FOUND,
        TimeEntryRejection::ExceedsDailyMax => StatusCode::CONFLICT,
    }
}

/// First message per field. Fields without a message fall back to the
/// validator code.
fn field_messages(errors: &validator::ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - A unique violation on `uq_users_epost` maps to 409 `DUPLICATE_EMAIL`.
/// - Other unique violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Ressursen finnes ikke".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == EPOST_UNIQUE_CONSTRAINT {
                    return classify_core_error(&CoreError::DuplicateEmail(String::new()));
                }
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Verdien finnes allerede ({constraint})"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
