use std::fs;
use std::path::Path;

use tracing::warn;

use crate::app::error::AppError;
use crate::app::models::ExportOutcome;

pub mod pdf;

pub const TEXT_FILE_NAME: &str = "extracted_data.txt";
pub const CSV_FILE_NAME: &str = "extracted_data.csv";
pub const PDF_FILE_NAME: &str = "extracted_data.pdf";

/// Writes the three export artifacts into `dest`, which must already exist.
///
/// All three writes are attempted independently. Text or CSV failures make
/// the export as a whole fail (after the remaining artifacts were still
/// attempted); a PDF failure is recorded in the outcome but does not.
pub fn write_artifacts(
    report_text: &str,
    dest: &Path,
    trace_id: &str,
) -> Result<ExportOutcome, AppError> {
    if !dest.is_dir() {
        return Err(AppError::validation(
            format!("Export destination {} is not an existing directory", dest.display()),
            trace_id,
        ));
    }

    let rows: Vec<&str> = report_text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    let mut outcome = ExportOutcome::default();
    let mut fatal: Vec<String> = Vec::new();

    let text_path = dest.join(TEXT_FILE_NAME);
    match fs::write(&text_path, report_text) {
        Ok(()) => outcome.text_path = Some(text_path.display().to_string()),
        Err(err) => fatal.push(format!("text: {err}")),
    }

    let csv_path = dest.join(CSV_FILE_NAME);
    match fs::write(&csv_path, render_csv(&rows)) {
        Ok(()) => outcome.csv_path = Some(csv_path.display().to_string()),
        Err(err) => fatal.push(format!("csv: {err}")),
    }

    let pdf_path = dest.join(PDF_FILE_NAME);
    match pdf::write_pdf(&rows, &pdf_path) {
        Ok(()) => outcome.pdf_path = Some(pdf_path.display().to_string()),
        Err(err) => {
            warn!(trace_id = %trace_id, error = %err, "PDF export failed");
            outcome.pdf_error = Some(err);
        }
    }

    if !fatal.is_empty() {
        return Err(AppError::export(
            format!("Export failed: {}", fatal.join("; ")),
            trace_id,
        ));
    }
    Ok(outcome)
}

/// One unsplit field per row, no header. Each report line is a single opaque
/// value; quoting only kicks in when the value needs it.
fn render_csv(rows: &[&str]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&csv_field(row));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_artifact_is_verbatim_and_csv_drops_blank_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = "A\n\nB\n";
        let outcome = write_artifacts(report, dir.path(), "test-trace").expect("export");

        let text = fs::read_to_string(dir.path().join(TEXT_FILE_NAME)).expect("read txt");
        assert_eq!(text, report);

        let csv = fs::read_to_string(dir.path().join(CSV_FILE_NAME)).expect("read csv");
        assert_eq!(csv, "A\nB\n");
        assert!(outcome.text_path.is_some());
        assert!(outcome.csv_path.is_some());
    }

    #[test]
    fn csv_has_one_row_per_nonblank_line_and_no_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = "--- Call Logs ---\nRow 1: number=555, date=1700000000000\n   \nRow 2\n";
        write_artifacts(report, dir.path(), "test-trace").expect("export");

        let csv = fs::read_to_string(dir.path().join(CSV_FILE_NAME)).expect("read csv");
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "--- Call Logs ---");
        assert_eq!(rows[1], "\"Row 1: number=555, date=1700000000000\"");
        assert_eq!(rows[2], "Row 2");
    }

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn missing_destination_aborts_before_any_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("not-created");
        let err = write_artifacts("A\n", &missing, "test-trace").expect_err("must fail");
        assert_eq!(err.code, "ERR_VALIDATION");
        assert!(!missing.exists());
    }

    #[test]
    fn pdf_failure_does_not_fail_the_export() {
        // Font availability varies by machine; whichever way the PDF write
        // goes, text and csv must land and the outcome must say what happened.
        let dir = tempfile::tempdir().expect("tempdir");
        let outcome = write_artifacts("A\nB\n", dir.path(), "test-trace").expect("export");
        assert!(outcome.text_path.is_some());
        assert!(outcome.csv_path.is_some());
        assert!(outcome.pdf_path.is_some() || outcome.pdf_error.is_some());
    }
}
