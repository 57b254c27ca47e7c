// ============================================================
// BATCH LOADER
// ============================================================
// Insert accepted rows in fixed-size chunks, skipping known duplicates

use std::sync::Arc;

use crate::domain::location::{
    AcceptedRow, BulkInsertOptions, BulkInsertResult, FailedRow, NewLocation,
};
use crate::infrastructure::db::LocationStore;

pub const DEFAULT_BATCH_SIZE: usize = 50;

pub struct BatchLoader {
    store: Arc<dyn LocationStore>,
    batch_size: usize,
}

impl BatchLoader {
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self {
            store,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Load every accepted row, one chunk at a time.
    ///
    /// Never aborts: a failed chunk is recorded against all of its rows and
    /// the next chunk is still attempted. Every input row ends up counted
    /// exactly once as inserted, skipped or failed.
    pub async fn load(
        &self,
        rows: Vec<AcceptedRow>,
        options: &BulkInsertOptions,
    ) -> BulkInsertResult {
        let mut result = BulkInsertResult::default();
        let total = rows.len();
        let mut rows = rows.into_iter();
        let mut chunk_index = 0;

        loop {
            let chunk: Vec<AcceptedRow> = rows.by_ref().take(self.batch_size).collect();
            if chunk.is_empty() {
                break;
            }
            self.load_chunk(chunk_index, chunk, options, &mut result).await;
            chunk_index += 1;
        }

        tracing::info!(
            total,
            chunks = chunk_index,
            inserted = result.success_count,
            skipped = result.skipped_count,
            failed = result.failed_rows.len(),
            "Bulk insert finished"
        );
        result
    }

    async fn load_chunk(
        &self,
        chunk_index: usize,
        chunk: Vec<AcceptedRow>,
        options: &BulkInsertOptions,
        result: &mut BulkInsertResult,
    ) {
        let mut pending = Vec::with_capacity(chunk.len());

        for row in chunk {
            if options.skip_duplicates {
                match self.store.exists(&row.address, &row.suburb).await {
                    Ok(true) => {
                        tracing::debug!(
                            row = row.row_number,
                            address = %row.address,
                            suburb = %row.suburb,
                            "Skipping duplicate location"
                        );
                        result.skipped_count += 1;
                        continue;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        tracing::warn!(row = row.row_number, error = %e, "Duplicate check failed");
                        result.failed_rows.push(FailedRow {
                            row,
                            error_message: e.to_string(),
                        });
                        continue;
                    }
                }
            }
            pending.push(NewLocation::stamp(row, options));
        }

        if pending.is_empty() {
            return;
        }

        match self.store.insert_batch(&pending).await {
            Ok(inserted) => {
                let submitted = pending.len();
                let inserted = usize::try_from(inserted).unwrap_or(usize::MAX).min(submitted);
                result.success_count += inserted;

                if inserted < submitted {
                    // Which rows were dropped is unknown; fail the tail
                    tracing::warn!(
                        chunk = chunk_index,
                        submitted,
                        inserted,
                        "Store inserted fewer rows than submitted"
                    );
                    let message = format!(
                        "Store reported {} of {} rows inserted",
                        inserted, submitted
                    );
                    result
                        .failed_rows
                        .extend(pending.into_iter().skip(inserted).map(|new_location| FailedRow {
                            row: new_location.location,
                            error_message: message.clone(),
                        }));
                } else {
                    tracing::debug!(chunk = chunk_index, rows = inserted, "Chunk inserted");
                }
            }
            Err(e) => {
                tracing::error!(
                    chunk = chunk_index,
                    rows = pending.len(),
                    error = %e,
                    "Chunk insert failed"
                );
                let message = e.to_string();
                result
                    .failed_rows
                    .extend(pending.into_iter().map(|new_location| FailedRow {
                        row: new_location.location,
                        error_message: message.clone(),
                    }));
            }
        }
    }
}
