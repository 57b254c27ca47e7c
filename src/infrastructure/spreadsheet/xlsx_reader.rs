use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

use crate::domain::error::{AppError, Result};
use crate::domain::location::CellValue;

/// Read the first worksheet of an uploaded workbook as rows of cells.
///
/// Only the first sheet is read; any other sheets are ignored.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<Vec<CellValue>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| AppError::ParseError(format!("Failed to open spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read worksheet: {}", e)))?;

    tracing::debug!(
        rows = range.height(),
        columns = range.width(),
        "Read first worksheet"
    );

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect())
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        other => CellValue::Text(format!("{}", other)),
    }
}
