// ============================================================
// LOCATION SCHEMA CATALOG
// ============================================================
// Canonical column definitions shared by the starter template and
// the row validator. Column order here is the template order.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use super::{AustralianState, CellValue, Category, RawRow};

pub const DEFAULT_COUNTRY: &str = "Australia";

/// Normalized column keys
pub mod columns {
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category";
    pub const SUBCATEGORY: &str = "subcategory";
    pub const ADDRESS: &str = "address";
    pub const SUBURB: &str = "suburb";
    pub const STATE: &str = "state";
    pub const POSTCODE: &str = "postcode";
    pub const COUNTRY: &str = "country";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const DESCRIPTION: &str = "description";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const WEBSITE: &str = "website";
    pub const INSTAGRAM: &str = "instagram";
    pub const CAPACITY: &str = "capacity";
    pub const BEST_FOR: &str = "best_for";
    pub const ACCESSIBILITY_NOTES: &str = "accessibility_notes";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Enum,
    Email,
    Url,
    Freeform,
}

/// One column of the import schema
#[derive(Debug, Clone, Serialize)]
pub struct SchemaField {
    pub key: &'static str,
    pub display_header: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<&'static str>,
    pub example: &'static str,
    pub note: &'static str,
}

impl SchemaField {
    /// Header as written to the starter file; required columns carry `*`.
    pub fn header_label(&self) -> String {
        if self.required {
            format!("{}*", self.display_header)
        } else {
            self.display_header.to_string()
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Number
    }
}

fn field(
    key: &'static str,
    display_header: &'static str,
    required: bool,
    kind: FieldKind,
    example: &'static str,
    note: &'static str,
) -> SchemaField {
    SchemaField {
        key,
        display_header,
        required,
        kind,
        enum_values: None,
        default_value: None,
        example,
        note,
    }
}

static FIELDS: Lazy<Vec<SchemaField>> = Lazy::new(|| {
    use columns::*;

    vec![
        field(NAME, "Name", true, FieldKind::Text, "The Corner Hotel",
            "Required. Business or organisation name."),
        SchemaField {
            enum_values: Some(Category::labels()),
            ..field(CATEGORY, "Category", true, FieldKind::Enum, "Venue",
                "Required. One of: Venue, Studio, Festival, Label, Management, Services, Education, Government/Peak Body, Community Organisation, Co-working/Creative Hub, Gallery/Arts Space, Other.")
        },
        field(SUBCATEGORY, "Subcategory", false, FieldKind::Freeform, "Live Music Venue",
            "Optional. Free text, e.g. Rehearsal Studio."),
        field(ADDRESS, "Address", true, FieldKind::Text, "57 Swan Street",
            "Required. Street address. Used with Suburb to detect duplicates."),
        field(SUBURB, "Suburb", true, FieldKind::Text, "Richmond",
            "Required. Suburb or town."),
        SchemaField {
            enum_values: Some(AustralianState::codes()),
            ..field(STATE, "State", true, FieldKind::Enum, "VIC",
                "Required. One of: VIC, NSW, QLD, SA, WA, TAS, NT, ACT.")
        },
        field(POSTCODE, "Postcode", true, FieldKind::Text, "3121",
            "Required. Exactly 4 digits."),
        SchemaField {
            default_value: Some(DEFAULT_COUNTRY),
            ..field(COUNTRY, "Country", false, FieldKind::Text, "Australia",
                "Optional. Defaults to Australia when left blank.")
        },
        field(LATITUDE, "Latitude", true, FieldKind::Number, "-37.8255",
            "Required. Decimal degrees between -90 and 90."),
        field(LONGITUDE, "Longitude", true, FieldKind::Number, "144.993",
            "Required. Decimal degrees between -180 and 180."),
        field(DESCRIPTION, "Description", false, FieldKind::Freeform,
            "Long-running live music venue hosting local and touring acts.",
            "Optional. Short public description."),
        field(EMAIL, "Email", false, FieldKind::Email, "bookings@example.com",
            "Optional. Must look like name@domain.com."),
        field(PHONE, "Phone", false, FieldKind::Text, "03 9427 7300",
            "Optional. Any format."),
        field(WEBSITE, "Website", false, FieldKind::Url, "https://example.com",
            "Optional. Full URL starting with http:// or https://."),
        field(INSTAGRAM, "Instagram", false, FieldKind::Text, "@cornerhotel",
            "Optional. Handle starting with @."),
        field(CAPACITY, "Capacity", false, FieldKind::Number, "850",
            "Optional. Whole number of 0 or more."),
        field(BEST_FOR, "Best For", false, FieldKind::Freeform, "Live music, touring acts",
            "Optional. Free text."),
        field(ACCESSIBILITY_NOTES, "Accessibility Notes", false, FieldKind::Freeform,
            "Step-free access via the side entrance.",
            "Optional. Free text."),
    ]
});

/// Single source of truth for the import columns
pub struct SchemaCatalog;

impl SchemaCatalog {
    pub fn field_rules() -> &'static [SchemaField] {
        FIELDS.as_slice()
    }

    pub fn field(key: &str) -> Option<&'static SchemaField> {
        FIELDS.iter().find(|f| f.key == key)
    }

    /// Display headers in template order, required columns marked with `*`
    pub fn headers() -> Vec<String> {
        FIELDS.iter().map(SchemaField::header_label).collect()
    }

    /// One plain-language note per column, in template order
    pub fn validation_notes() -> Vec<&'static str> {
        FIELDS.iter().map(|f| f.note).collect()
    }

    /// A fully valid row, also used as a validation fixture
    pub fn example_row() -> RawRow {
        let cells = FIELDS
            .iter()
            .map(|f| (f.key.to_string(), CellValue::Text(f.example.to_string())))
            .collect::<HashMap<_, _>>();
        RawRow::new(2, cells)
    }

    /// Example values typed for a spreadsheet: numeric columns as numbers
    pub fn example_cells() -> Vec<CellValue> {
        FIELDS
            .iter()
            .map(|f| match f.example.parse::<f64>() {
                Ok(n) if f.is_numeric() => CellValue::Number(n),
                _ => CellValue::Text(f.example.to_string()),
            })
            .collect()
    }
}
