//! Handler for the spreadsheet export.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use timeforing_core::report::{Report, ReportLine};
use timeforing_core::types::{DbId, EntryDate};
use timeforing_db::models::time_entry::DateRange;
use timeforing_db::repositories::TimeEntryRepo;

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::extract::ApiQuery;
use crate::middleware::rbac::RequireUser;
use crate::state::AppState;
use crate::xlsx::{render_workbook, XLSX_CONTENT_TYPE};

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub from: Option<EntryDate>,
    pub to: Option<EntryDate>,
    pub project_id: Option<DbId>,
}

/// GET /api/reports/excel?from=&to=&project_id=
///
/// Export the caller's time entries as an `.xlsx` attachment.
pub async fn excel(
    State(state): State<AppState>,
    ctx: RequestContext,
    RequireUser(user): RequireUser,
    ApiQuery(params): ApiQuery<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let range = DateRange {
        from: params.from,
        to: params.to,
    };
    let rows = TimeEntryRepo::list_with_project(&state.pool, &user.sub, range).await?;
    let lines = rows
        .into_iter()
        .map(|r| ReportLine {
            date: r.dato,
            project_id: r.project_id,
            project_name: r.project_navn,
            hours: r.timer,
            comment: r.kommentar,
        })
        .collect();

    let report = Report::new(user.reporter(), lines, params.project_id);
    let bytes = render_workbook(&report)
        .map_err(|e| AppError::InternalError(format!("xlsx rendering failed: {e}")))?;

    tracing::info!(
        correlation_id = %ctx.correlation_id,
        user_sub = %user.sub,
        rows = report.lines.len(),
        "Report exported"
    );

    let filename = format!(
        "attachment; filename=\"time-report-{}.xlsx\"",
        chrono::Utc::now().timestamp_millis()
    );
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, filename),
        ],
        bytes,
    ))
}
