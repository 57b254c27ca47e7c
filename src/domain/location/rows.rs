// ============================================================
// LOCATION ROW TYPES
// ============================================================
// Rows as they move through decode -> validate -> load

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{AustralianState, Category};

/// An untyped cell read from an uploaded file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Trimmed text form of the cell, `None` when blank.
    ///
    /// Integral numbers render without a decimal point so a postcode typed as a
    /// number in a spreadsheet reads back as `3000`, not `3000.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => Some(format_number(*n)),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// A decoded data row keyed by normalized header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRow {
    /// 1-based display row number (data index + 2, accounting for the header)
    pub row_number: usize,

    pub cells: HashMap<String, CellValue>,
}

impl RawRow {
    pub fn new(row_number: usize, cells: HashMap<String, CellValue>) -> Self {
        Self { row_number, cells }
    }

    pub fn get(&self, key: &str) -> &CellValue {
        self.cells.get(key).unwrap_or(&EMPTY_CELL)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).as_text()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_blank)
    }
}

/// A row that passed every schema rule, coerced to store types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedRow {
    pub row_number: usize,
    pub name: String,
    pub category: Category,
    pub subcategory: Option<String>,
    pub address: String,
    pub suburb: String,
    pub state: AustralianState,
    pub postcode: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub capacity: Option<u32>,
    pub best_for: Option<String>,
    pub accessibility_notes: Option<String>,
}

impl AcceptedRow {
    /// Cell text in schema column order, for re-uploadable reports.
    pub fn column_values(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.name.clone(),
            self.category.as_str().to_string(),
            opt(&self.subcategory),
            self.address.clone(),
            self.suburb.clone(),
            self.state.as_str().to_string(),
            self.postcode.clone(),
            self.country.clone(),
            self.latitude.to_string(),
            self.longitude.to_string(),
            opt(&self.description),
            opt(&self.email),
            opt(&self.phone),
            opt(&self.website),
            opt(&self.instagram),
            self.capacity.map(|c| c.to_string()).unwrap_or_default(),
            opt(&self.best_for),
            opt(&self.accessibility_notes),
        ]
    }
}

/// A row that failed at least one schema rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub row_number: usize,

    /// Trimmed text of every non-blank schema column that was present
    pub fields: BTreeMap<String, String>,

    /// Every violation found, in column order
    pub errors: Vec<String>,
}

impl RejectedRow {
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}
