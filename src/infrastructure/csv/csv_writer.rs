// ============================================================
// CSV WRITER
// ============================================================
// Render rows as fully quoted CSV bytes

use csv::{QuoteStyle, WriterBuilder};

use crate::domain::error::AppError;

/// Write a header and rows with every field quoted.
///
/// Renders everything or fails; no partial output is returned.
pub fn write_quoted<H, R>(headers: &[H], rows: &[R]) -> Result<Vec<u8>, AppError>
where
    H: AsRef<str>,
    R: AsRef<[String]>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(headers.iter().map(|h| h.as_ref()))
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

    for (index, row) in rows.iter().enumerate() {
        writer.write_record(row.as_ref()).map_err(|e| {
            AppError::Internal(format!("Failed to write CSV row {}: {}", index + 1, e))
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_is_quoted() {
        let rows = vec![vec!["2".to_string(), "a, \"b\"".to_string()]];
        let bytes = write_quoted(&["Row", "Errors"], rows.as_slice()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "\"Row\",\"Errors\"\n\"2\",\"a, \"\"b\"\"\"\n");
    }

    #[test]
    fn test_header_only() {
        let rows: Vec<Vec<String>> = Vec::new();
        let bytes = write_quoted(&["Row"], rows.as_slice()).unwrap();
        assert_eq!(bytes, b"\"Row\"\n");
    }
}
