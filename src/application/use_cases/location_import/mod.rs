// ============================================================
// LOCATION IMPORT USE CASE
// ============================================================
// Decode -> validate -> load, tracking the pipeline stage

mod batch_loader;
mod decoder;
mod report;
mod template;
mod validator;

pub use batch_loader::{BatchLoader, DEFAULT_BATCH_SIZE};
pub use decoder::{normalize_header, FileDecoder};
pub use report::{ReportRows, ReportWriter, FAILURE_REPORT_FILE, VALIDATION_REPORT_FILE};
pub use template::{TemplateWriter, TEMPLATE_CSV_FILE, TEMPLATE_SHEET_NAME, TEMPLATE_XLSX_FILE};
pub use validator::RowValidator;

use std::path::Path;
use std::sync::Arc;
use ::validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::domain::location::{
    BulkInsertOptions, BulkInsertResult, FileFormat, ImportReport, ImportStage, RawRow,
};
use crate::infrastructure::db::LocationStore;

/// An uploaded file as received by a driver
#[derive(Debug, Clone)]
pub struct ImportUpload {
    pub file_name: Option<String>,
    pub extension: String,
    pub bytes: Vec<u8>,
}

impl ImportUpload {
    pub fn new(extension: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: None,
            extension: extension.into(),
            bytes,
        }
    }

    /// Take the extension from the file name (`venues.xlsx` -> `xlsx`)
    pub fn from_file_name(file_name: &str, bytes: Vec<u8>) -> Self {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();

        Self {
            file_name: Some(file_name.to_string()),
            extension,
            bytes,
        }
    }
}

pub struct LocationImportUseCase {
    decoder: FileDecoder,
    validator: RowValidator,
    loader: BatchLoader,
}

impl LocationImportUseCase {
    pub fn new(store: Arc<dyn LocationStore>, batch_size: usize) -> Self {
        Self {
            decoder: FileDecoder::new(),
            validator: RowValidator::new(),
            loader: BatchLoader::new(store).with_batch_size(batch_size),
        }
    }

    /// Run the whole pipeline for one upload.
    ///
    /// Errors only for bad options or an undecodable file; row problems are
    /// reported in the returned `ImportReport`.
    pub async fn execute(
        &self,
        upload: ImportUpload,
        options: BulkInsertOptions,
    ) -> Result<ImportReport> {
        options
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid import options: {}", e)))?;

        let (format, rows, stage) = self.decode_upload(&upload)?;
        let total_rows = rows.len();

        let (accepted, rejected) = self.validator.validate_all(&rows);
        let accepted_count = accepted.len();
        let stage = transition(
            stage,
            ImportStage::Validated {
                accepted: accepted_count,
                rejected: rejected.len(),
            },
        )?;

        let stage = transition(stage, ImportStage::Loading)?;
        let result = self.loader.load(accepted, &options).await;
        let stage = transition(stage, ImportStage::Completed)?;

        tracing::info!(
            file = upload.file_name.as_deref().unwrap_or("<unnamed>"),
            total_rows,
            accepted = accepted_count,
            rejected = rejected.len(),
            inserted = result.success_count,
            skipped = result.skipped_count,
            failed = result.failed_rows.len(),
            "Location import completed"
        );

        Ok(ImportReport {
            file_name: upload.file_name,
            format,
            total_rows,
            accepted_count,
            rejected,
            result,
            stage,
        })
    }

    /// Decode and validate without touching the store
    pub fn preview(&self, upload: ImportUpload) -> Result<ImportReport> {
        let (format, rows, stage) = self.decode_upload(&upload)?;
        let (accepted, rejected) = self.validator.validate_all(&rows);
        let stage = transition(
            stage,
            ImportStage::Validated {
                accepted: accepted.len(),
                rejected: rejected.len(),
            },
        )?;

        Ok(ImportReport {
            file_name: upload.file_name,
            format,
            total_rows: rows.len(),
            accepted_count: accepted.len(),
            rejected,
            result: BulkInsertResult::default(),
            stage,
        })
    }

    fn decode_upload(
        &self,
        upload: &ImportUpload,
    ) -> Result<(FileFormat, Vec<RawRow>, ImportStage)> {
        let stage = transition(ImportStage::Idle, ImportStage::Decoding)?;

        let decoded = FileFormat::from_extension(&upload.extension).and_then(|format| {
            let rows = self.decoder.decode_as(&upload.bytes, format)?;
            Ok((format, rows))
        });

        match decoded {
            Ok((format, rows)) => Ok((format, rows, stage)),
            Err(e) => {
                let failed = stage.advance(ImportStage::Failed {
                    reason: e.to_string(),
                })?;
                tracing::warn!(
                    stage = failed.name(),
                    file = upload.file_name.as_deref().unwrap_or("<unnamed>"),
                    error = %e,
                    "Location import failed"
                );
                Err(e)
            }
        }
    }
}

fn transition(from: ImportStage, to: ImportStage) -> Result<ImportStage> {
    let next = from.advance(to)?;
    tracing::debug!(stage = next.name(), "Import stage changed");
    Ok(next)
}
