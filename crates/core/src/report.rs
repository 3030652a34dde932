//! Report content for the spreadsheet export.
//!
//! Builds the rows and totals; rendering to a file format lives in the API
//! crate.

use crate::types::{DbId, EntryDate};

/// Worksheet title.
pub const SHEET_NAME: &str = "Timeføringer";

/// Column headings, in order.
pub const HEADERS: [&str; 4] = ["Dato", "Prosjekt", "Timer", "Kommentar"];

/// Label placed in the project column of the summary row.
pub const TOTAL_LABEL: &str = "Totalt";

/// One time entry as it appears in a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub date: EntryDate,
    pub project_id: DbId,
    pub project_name: String,
    pub hours: f64,
    pub comment: Option<String>,
}

/// Who the report was produced for, taken from token claims when present.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Reporter {
    /// Title line such as `Rapport for Ola Nordmann <ola@example.no>`, if any
    /// identity is known.
    pub fn title(&self) -> Option<String> {
        match (&self.name, &self.email) {
            (Some(name), Some(email)) => Some(format!("Rapport for {name} <{email}>")),
            (Some(name), None) => Some(format!("Rapport for {name}")),
            (None, Some(email)) => Some(format!("Rapport for {email}")),
            (None, None) => None,
        }
    }
}

/// Rows and total for one export.
#[derive(Debug, Clone)]
pub struct Report {
    pub reporter: Reporter,
    pub lines: Vec<ReportLine>,
}

impl Report {
    /// Keep only lines for `project_id`, when a filter is given.
    pub fn new(reporter: Reporter, lines: Vec<ReportLine>, project_id: Option<DbId>) -> Self {
        let lines = match project_id {
            Some(id) => lines.into_iter().filter(|l| l.project_id == id).collect(),
            None => lines,
        };
        Self { reporter, lines }
    }

    pub fn total_hours(&self) -> f64 {
        self.lines.iter().map(|l| l.hours).sum()
    }
}

/// Dates are shown Norwegian style, `dd.MM.yyyy`.
pub fn format_date(date: EntryDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
