// ============================================================
// CSV PARSER
// ============================================================
// Parse uploaded CSV bytes with encoding detection and error handling

use csv::{ReaderBuilder, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;

use crate::domain::error::AppError;

/// Header row plus raw records, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// CSV parser with encoding detection
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    #[cfg(test)]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    #[cfg(test)]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse raw upload bytes
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<CsvTable, AppError> {
        let content = decode_text(bytes);
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<CsvTable, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 2, e))
            })?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Ok(CsvTable { headers, records })
    }
}

/// Decode as UTF-8 (BOM stripped), falling back to Windows-1252 which is what
/// spreadsheet apps commonly export.
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (content, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return content;
    }

    let (content, _, _) = WINDOWS_1252.decode(bytes);
    content
}
