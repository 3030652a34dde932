//! Renders a [`Report`] as an `.xlsx` workbook.

use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};
use timeforing_core::report::{format_date, Report, HEADERS, SHEET_NAME, TOTAL_LABEL};

/// MIME type of the rendered workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Write the report to an in-memory workbook.
///
/// Layout: optional title row, bold centred header row, one row per line,
/// then a `Totalt` row with the hour sum.
pub fn render_workbook(report: &Report) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let header = Format::new().set_bold().set_align(FormatAlign::Center);

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let mut row: u32 = 0;
        if let Some(title) = report.reporter.title() {
            sheet.write_string_with_format(row, 0, &title, &bold)?;
            row += 2;
        }

        for (col, heading) in (0u16..).zip(HEADERS) {
            sheet.write_string_with_format(row, col, heading, &header)?;
        }
        row += 1;

        for line in &report.lines {
            sheet.write_string(row, 0, format_date(line.date))?;
            sheet.write_string(row, 1, &line.project_name)?;
            sheet.write_number(row, 2, line.hours)?;
            if let Some(comment) = &line.comment {
                sheet.write_string(row, 3, comment)?;
            }
            row += 1;
        }

        sheet.write_string_with_format(row, 1, TOTAL_LABEL, &bold)?;
        sheet.write_number_with_format(row, 2, report.total_hours(), &bold)?;

        sheet.autofit();
    }

    workbook.save_to_buffer()
}
