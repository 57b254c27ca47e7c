// ============================================================
// STARTER TEMPLATE
// ============================================================
// Blank-ish upload files: header row, one example row, one notes row

use crate::domain::error::Result;
use crate::domain::location::{CellValue, SchemaCatalog};
use crate::infrastructure::csv::write_quoted;
use crate::infrastructure::spreadsheet::write_workbook;

pub const TEMPLATE_SHEET_NAME: &str = "Locations";
pub const TEMPLATE_CSV_FILE: &str = "location_import_template.csv";
pub const TEMPLATE_XLSX_FILE: &str = "location_import_template.xlsx";

pub struct TemplateWriter;

impl TemplateWriter {
    pub fn starter_csv() -> Result<Vec<u8>> {
        let fields = SchemaCatalog::field_rules();
        let example: Vec<String> = fields.iter().map(|f| f.example.to_string()).collect();
        let notes: Vec<String> = fields.iter().map(|f| f.note.to_string()).collect();

        write_quoted(SchemaCatalog::headers().as_slice(), [example, notes].as_slice())
    }

    /// Numeric example cells are written as numbers
    pub fn starter_xlsx() -> Result<Vec<u8>> {
        let headers: Vec<CellValue> = SchemaCatalog::headers()
            .into_iter()
            .map(CellValue::Text)
            .collect();
        let notes: Vec<CellValue> = SchemaCatalog::validation_notes()
            .into_iter()
            .map(|note| CellValue::Text(note.to_string()))
            .collect();

        write_workbook(
            TEMPLATE_SHEET_NAME,
            &[headers, SchemaCatalog::example_cells(), notes],
        )
    }
}
