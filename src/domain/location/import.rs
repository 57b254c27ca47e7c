// ============================================================
// BULK IMPORT TYPES
// ============================================================
// Options, load outcomes and the driver-facing report

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{AcceptedRow, ImportStage, RejectedRow};
use crate::domain::error::{AppError, Result};

/// Provenance marker stamped on every row created by an upload
pub const BULK_IMPORT_SOURCE: &str = "bulk_import";

/// Review status given to imported locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Draft,
    #[default]
    Pending,
    Approved,
}

impl LocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationStatus::Draft => "draft",
            LocationStatus::Pending => "pending",
            LocationStatus::Approved => "approved",
        }
    }
}

/// Upload encodings the decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Csv,
    Spreadsheet,
}

impl FileFormat {
    /// Select a decoder from a file extension (`csv`, `.XLSX`, ...)
    pub fn from_extension(extension: &str) -> Result<Self> {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(FileFormat::Spreadsheet),
            _ => Err(AppError::UnsupportedFormat(format!(
                "'{}' files are not supported; upload a .csv or .xlsx file",
                extension.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkInsertOptions {
    pub target_status: LocationStatus,
    pub skip_duplicates: bool,
    #[validate(length(min = 1, max = 128))]
    pub acting_user_id: String,
}

/// An accepted row stamped for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub location: AcceptedRow,
    pub status: LocationStatus,
    pub source: &'static str,
    pub created_by: String,
}

impl NewLocation {
    pub fn stamp(location: AcceptedRow, options: &BulkInsertOptions) -> Self {
        Self {
            location,
            status: options.target_status,
            source: BULK_IMPORT_SOURCE,
            created_by: options.acting_user_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRow {
    pub row: AcceptedRow,
    pub error_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkInsertResult {
    pub success_count: usize,
    pub skipped_count: usize,
    pub failed_rows: Vec<FailedRow>,
}

impl BulkInsertResult {
    /// Rows accounted for; equals the number of accepted rows loaded
    pub fn total(&self) -> usize {
        self.success_count + self.skipped_count + self.failed_rows.len()
    }
}

/// Everything the driver needs after a run
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub file_name: Option<String>,
    pub format: FileFormat,
    pub total_rows: usize,
    pub accepted_count: usize,
    pub rejected: Vec<RejectedRow>,
    pub result: BulkInsertResult,
    pub stage: ImportStage,
}

impl ImportReport {
    /// Only true when nothing was rejected and nothing failed to insert
    pub fn is_complete_success(&self) -> bool {
        self.rejected.is_empty() && self.result.failed_rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_selects_format() {
        assert_eq!(FileFormat::from_extension("csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_extension(".CSV").unwrap(), FileFormat::Csv);
        assert_eq!(
            FileFormat::from_extension("xlsx").unwrap(),
            FileFormat::Spreadsheet
        );
        assert_eq!(
            FileFormat::from_extension("xls").unwrap(),
            FileFormat::Spreadsheet
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        for ext in ["pdf", "json", "", "txt"] {
            assert!(matches!(
                FileFormat::from_extension(ext),
                Err(AppError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_options_require_user() {
        let options = BulkInsertOptions {
            target_status: LocationStatus::Pending,
            skip_duplicates: true,
            acting_user_id: String::new(),
        };
        assert!(options.validate().is_err());

        let options = BulkInsertOptions {
            acting_user_id: "user-42".into(),
            ..options
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_status_wire_names() {
        let status: LocationStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, LocationStatus::Approved);
        assert_eq!(LocationStatus::default().as_str(), "pending");
    }
}
