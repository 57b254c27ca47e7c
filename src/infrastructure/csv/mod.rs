// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing with encoding detection, and quoted CSV output

mod csv_parser;
mod csv_writer;

pub use csv_parser::{CsvParser, CsvTable};
pub use csv_writer::write_quoted;
