// ============================================================
// LOCATION DOMAIN LAYER
// ============================================================
// Core types and value objects for location bulk import
// No I/O, no async

mod category;
mod import;
mod rows;
pub mod schema;
mod stage;

pub use category::{AustralianState, Category};
pub use import::{
    BulkInsertOptions, BulkInsertResult, FailedRow, FileFormat, ImportReport, LocationStatus,
    NewLocation, BULK_IMPORT_SOURCE,
};
pub use rows::{AcceptedRow, CellValue, RawRow, RejectedRow};
pub use schema::{columns, FieldKind, SchemaCatalog, SchemaField, DEFAULT_COUNTRY};
pub use stage::ImportStage;
