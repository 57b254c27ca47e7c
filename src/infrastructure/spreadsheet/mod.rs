// ============================================================
// SPREADSHEET INFRASTRUCTURE LAYER
// ============================================================
// Workbook decoding (calamine) and starter-file workbook output

mod xlsx_reader;
mod xlsx_writer;

pub use xlsx_reader::read_first_sheet;
pub use xlsx_writer::write_workbook;
