// ============================================================
// FILE DECODER
// ============================================================
// Turn an uploaded CSV or spreadsheet into header-keyed raw rows

use std::collections::{HashMap, HashSet};

use crate::domain::error::Result;
use crate::domain::location::{CellValue, FileFormat, RawRow};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::spreadsheet::read_first_sheet;

/// Header text to column key: `" Best For* "` -> `"best_for"`
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| c == '*' || c.is_whitespace())
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Default)]
pub struct FileDecoder {
    csv: CsvParser,
}

impl FileDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode by file extension. Unknown extensions fail before any parsing.
    pub fn decode(&self, bytes: &[u8], extension: &str) -> Result<Vec<RawRow>> {
        let format = FileFormat::from_extension(extension)?;
        self.decode_as(bytes, format)
    }

    pub fn decode_as(&self, bytes: &[u8], format: FileFormat) -> Result<Vec<RawRow>> {
        let rows = match format {
            FileFormat::Csv => {
                let table = self.csv.parse_bytes(bytes)?;
                let records = table
                    .records
                    .into_iter()
                    .map(|record| record.into_iter().map(CellValue::Text).collect());
                rows_from_table(&table.headers, records)
            }
            FileFormat::Spreadsheet => {
                let mut grid = read_first_sheet(bytes)?.into_iter();
                let Some(header_row) = grid.next() else {
                    return Ok(Vec::new());
                };
                let headers: Vec<String> = header_row
                    .iter()
                    .map(|cell| cell.as_text().unwrap_or_default())
                    .collect();
                rows_from_table(&headers, grid)
            }
        };

        tracing::debug!(format = ?format, rows = rows.len(), "Decoded upload");
        Ok(rows)
    }
}

/// Zip records positionally with the header row.
///
/// Blank header cells drop their column; when two headers normalize to the
/// same key the first one wins. All-blank records are skipped and do not
/// consume a row number.
fn rows_from_table<I>(headers: &[String], records: I) -> Vec<RawRow>
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut seen = HashSet::new();
    let keys: Vec<Option<String>> = headers
        .iter()
        .map(|header| {
            let key = normalize_header(header);
            (!key.is_empty() && seen.insert(key.clone())).then_some(key)
        })
        .collect();

    let mut rows = Vec::new();
    for record in records {
        if record.iter().all(CellValue::is_blank) {
            continue;
        }

        let cells: HashMap<String, CellValue> = keys
            .iter()
            .zip(record)
            .filter_map(|(key, cell)| key.clone().map(|k| (k, cell)))
            .collect();

        rows.push(RawRow::new(rows.len() + 2, cells));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::location::SchemaCatalog;
    use crate::infrastructure::spreadsheet::write_workbook;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Name*"), "name");
        assert_eq!(normalize_header("  Best   For "), "best_for");
        assert_eq!(normalize_header("Accessibility Notes *"), "accessibility_notes");
        assert_eq!(normalize_header("POSTCODE"), "postcode");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_decode_csv_rows() {
        let csv = "Name*,Suburb*,Postcode*\n\
                   The Tote,Collingwood,3066\n\
                   \"Hotel, The\",Fitzroy,3065\n";
        let rows = FileDecoder::new().decode(csv.as_bytes(), "csv").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].text("name").as_deref(), Some("The Tote"));
        assert_eq!(rows[1].row_number, 3);
        assert_eq!(rows[1].text("name").as_deref(), Some("Hotel, The"));
        assert_eq!(rows[1].text("postcode").as_deref(), Some("3065"));
    }

    #[test]
    fn test_blank_rows_do_not_consume_row_numbers() {
        let csv = "Name,Suburb\nA,Richmond\n,\n  ,  \nB,Carlton\n";
        let rows = FileDecoder::new().decode(csv.as_bytes(), ".CSV").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row_number, 3);
        assert_eq!(rows[1].text("name").as_deref(), Some("B"));
    }

    #[test]
    fn test_short_rows_leave_cells_missing() {
        let csv = "Name,Suburb,State\nA,Richmond\n";
        let rows = FileDecoder::new().decode(csv.as_bytes(), "csv").unwrap();
        assert_eq!(rows[0].get("state"), &CellValue::Empty);
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let csv = "Name,,name\nFirst,ignored,Second\n";
        let rows = FileDecoder::new().decode(csv.as_bytes(), "csv").unwrap();
        assert_eq!(rows[0].cells.len(), 1);
        assert_eq!(rows[0].text("name").as_deref(), Some("First"));
    }

    #[test]
    fn test_unsupported_extension_fails_before_parsing() {
        let err = FileDecoder::new().decode(b"%PDF-1.7", "pdf").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_decode_spreadsheet_keeps_numbers() {
        let headers = SchemaCatalog::headers()
            .into_iter()
            .map(CellValue::Text)
            .collect::<Vec<_>>();
        let blank = vec![CellValue::Empty; headers.len()];
        let bytes = write_workbook(
            "Locations",
            &[headers, blank, SchemaCatalog::example_cells()],
        )
        .unwrap();

        let rows = FileDecoder::new().decode(&bytes, "xlsx").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].get("latitude"), &CellValue::Number(-37.8255));
        assert_eq!(rows[0].text("best_for").as_deref(), Some("Live music, touring acts"));
    }

    #[test]
    fn test_empty_csv_has_no_rows() {
        let rows = FileDecoder::new().decode(b"", "csv").unwrap();
        assert!(rows.is_empty());
    }
}
