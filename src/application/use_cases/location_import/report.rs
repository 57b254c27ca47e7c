// ============================================================
// IMPORT REPORTS
// ============================================================
// Downloadable CSV reports for rejected and failed rows

use crate::domain::error::Result;
use crate::domain::location::{columns, FailedRow, RejectedRow, SchemaCatalog};
use crate::infrastructure::csv::write_quoted;

pub const VALIDATION_REPORT_FILE: &str = "location_validation_errors.csv";
pub const FAILURE_REPORT_FILE: &str = "location_failed_rows.csv";

const VALIDATION_HEADERS: [&str; 5] = ["Row", "Errors", "Name", "Category", "Address"];

/// Which report to render
#[derive(Debug, Clone, Copy)]
pub enum ReportRows<'a> {
    Validation(&'a [RejectedRow]),
    Failures(&'a [FailedRow]),
}

impl ReportRows<'_> {
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportRows::Validation(_) => VALIDATION_REPORT_FILE,
            ReportRows::Failures(_) => FAILURE_REPORT_FILE,
        }
    }
}

pub struct ReportWriter;

impl ReportWriter {
    pub fn write_report(rows: ReportRows<'_>) -> Result<Vec<u8>> {
        match rows {
            ReportRows::Validation(rows) => Self::validation_report(rows),
            ReportRows::Failures(rows) => Self::failure_report(rows),
        }
    }

    /// `Row, Errors, Name, Category, Address`, errors joined with `"; "`
    pub fn validation_report(rows: &[RejectedRow]) -> Result<Vec<u8>> {
        let records: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                vec![
                    row.row_number.to_string(),
                    row.errors.join("; "),
                    row.field(columns::NAME).to_string(),
                    row.field(columns::CATEGORY).to_string(),
                    row.field(columns::ADDRESS).to_string(),
                ]
            })
            .collect();

        write_quoted(VALIDATION_HEADERS.as_slice(), records.as_slice())
    }

    /// Template columns plus `Error`, so the file can be fixed and re-uploaded
    pub fn failure_report(rows: &[FailedRow]) -> Result<Vec<u8>> {
        let mut headers = SchemaCatalog::headers();
        headers.push("Error".to_string());

        let records: Vec<Vec<String>> = rows
            .iter()
            .map(|failed| {
                let mut record = failed.row.column_values();
                record.push(failed.error_message.clone());
                record
            })
            .collect();

        write_quoted(headers.as_slice(), records.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::location_import::{FileDecoder, RowValidator};
    use std::collections::BTreeMap;

    fn rejected() -> RejectedRow {
        let mut fields = BTreeMap::new();
        fields.insert(columns::NAME.to_string(), "The Tote".to_string());
        fields.insert(columns::ADDRESS.to_string(), "71 Johnston St, Collingwood".to_string());
        RejectedRow {
            row_number: 4,
            fields,
            errors: vec![
                "Category is required".to_string(),
                "Postcode must be exactly 4 digits".to_string(),
            ],
        }
    }

    #[test]
    fn test_validation_report_layout() {
        let bytes = ReportWriter::validation_report(&[rejected()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "\"Row\",\"Errors\",\"Name\",\"Category\",\"Address\"\n\
             \"4\",\"Category is required; Postcode must be exactly 4 digits\",\"The Tote\",\"\",\"71 Johnston St, Collingwood\"\n"
        );
    }

    #[test]
    fn test_empty_validation_report_has_header_only() {
        let text = String::from_utf8(ReportWriter::validation_report(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_failure_report_can_be_reuploaded() {
        let row = RowValidator::new()
            .validate(&SchemaCatalog::example_row())
            .unwrap();
        let failed = FailedRow {
            row,
            error_message: "Database error: disk full".to_string(),
        };

        let bytes = ReportWriter::write_report(ReportRows::Failures(&[failed])).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("\"Name*\",\"Category*\""));
        assert!(header.ends_with("\"Accessibility Notes\",\"Error\""));

        let rows = FileDecoder::new().decode(&bytes, "csv").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("error").as_deref(), Some("Database error: disk full"));
        assert!(RowValidator::new().validate(&rows[0]).is_ok());
    }

    #[test]
    fn test_report_file_names() {
        assert_eq!(ReportRows::Validation(&[]).file_name(), VALIDATION_REPORT_FILE);
        assert_eq!(ReportRows::Failures(&[]).file_name(), FAILURE_REPORT_FILE);
    }
}
