// ============================================================
// ROW VALIDATOR
// ============================================================
// Check raw rows against the schema catalog, collecting every violation

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use url::Url;

use crate::domain::location::{
    columns, AcceptedRow, AustralianState, Category, RawRow, RejectedRow, SchemaCatalog,
    DEFAULT_COUNTRY,
};

static POSTCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct RowValidator;

impl RowValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate one row without stopping at the first problem.
    pub fn validate(&self, row: &RawRow) -> Result<AcceptedRow, RejectedRow> {
        let mut check = FieldCheck::new(row);

        let name = check.required(columns::NAME);
        let category = check.required_with(columns::CATEGORY, parse_category);
        let subcategory = check.optional(columns::SUBCATEGORY);
        let address = check.required(columns::ADDRESS);
        let suburb = check.required(columns::SUBURB);
        let state = check.required_with(columns::STATE, parse_state);
        let postcode = check.required_with(columns::POSTCODE, parse_postcode);
        let country = check
            .optional(columns::COUNTRY)
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
        let latitude = check.required_with(columns::LATITUDE, |v| parse_coordinate(v, "Latitude", 90.0));
        let longitude =
            check.required_with(columns::LONGITUDE, |v| parse_coordinate(v, "Longitude", 180.0));
        let description = check.optional(columns::DESCRIPTION);
        let email = check.optional_with(columns::EMAIL, parse_email);
        let phone = check.optional(columns::PHONE);
        let website = check.optional_with(columns::WEBSITE, parse_website);
        let instagram = check.optional_with(columns::INSTAGRAM, parse_instagram);
        let capacity = check.optional_with(columns::CAPACITY, parse_capacity);
        let best_for = check.optional(columns::BEST_FOR);
        let accessibility_notes = check.optional(columns::ACCESSIBILITY_NOTES);

        let (
            Some(name),
            Some(category),
            Some(address),
            Some(suburb),
            Some(state),
            Some(postcode),
            Some(latitude),
            Some(longitude),
        ) = (name, category, address, suburb, state, postcode, latitude, longitude)
        else {
            return Err(check.reject());
        };

        if check.has_errors() {
            return Err(check.reject());
        }

        Ok(AcceptedRow {
            row_number: row.row_number,
            name,
            category,
            subcategory,
            address,
            suburb,
            state,
            postcode,
            country,
            latitude,
            longitude,
            description,
            email,
            phone,
            website,
            instagram,
            capacity,
            best_for,
            accessibility_notes,
        })
    }

    /// Partition rows into accepted and rejected, keeping input order in both.
    pub fn validate_all(&self, rows: &[RawRow]) -> (Vec<AcceptedRow>, Vec<RejectedRow>) {
        let mut accepted = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();

        for row in rows {
            match self.validate(row) {
                Ok(row) => accepted.push(row),
                Err(row) => rejected.push(row),
            }
        }

        tracing::debug!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "Validated rows"
        );
        (accepted, rejected)
    }
}

/// Per-row error accumulator
struct FieldCheck<'a> {
    row: &'a RawRow,
    errors: Vec<String>,
}

impl<'a> FieldCheck<'a> {
    fn new(row: &'a RawRow) -> Self {
        Self {
            row,
            errors: Vec::new(),
        }
    }

    fn required(&mut self, key: &str) -> Option<String> {
        let value = self.row.text(key);
        if value.is_none() {
            self.errors.push(format!("{} is required", display_name(key)));
        }
        value
    }

    fn required_with<T>(
        &mut self,
        key: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let value = self.required(key)?;
        self.record(parse(&value))
    }

    fn optional(&self, key: &str) -> Option<String> {
        self.row.text(key)
    }

    fn optional_with<T>(
        &mut self,
        key: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let value = self.optional(key)?;
        self.record(parse(&value))
    }

    fn record<T>(&mut self, parsed: Result<T, String>) -> Option<T> {
        match parsed {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(message);
                None
            }
        }
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn reject(self) -> RejectedRow {
        let fields: BTreeMap<String, String> = SchemaCatalog::field_rules()
            .iter()
            .filter_map(|f| self.row.text(f.key).map(|v| (f.key.to_string(), v)))
            .collect();

        RejectedRow {
            row_number: self.row.row_number,
            fields,
            errors: self.errors,
        }
    }
}

fn display_name(key: &str) -> &str {
    SchemaCatalog::field(key)
        .map(|f| f.display_header)
        .unwrap_or(key)
}

fn parse_category(value: &str) -> Result<Category, String> {
    Category::from_label(value)
        .ok_or_else(|| format!("Category must be one of: {}", Category::labels().join(", ")))
}

fn parse_state(value: &str) -> Result<AustralianState, String> {
    AustralianState::from_code(&value.to_uppercase())
        .ok_or_else(|| format!("State must be one of: {}", AustralianState::codes().join(", ")))
}

fn parse_postcode(value: &str) -> Result<String, String> {
    if POSTCODE_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err("Postcode must be exactly 4 digits".to_string())
    }
}

fn parse_coordinate(value: &str, label: &str, limit: f64) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(n) if (-limit..=limit).contains(&n) => Ok(n),
        _ => Err(format!(
            "{} must be a number between -{} and {}",
            label, limit, limit
        )),
    }
}

fn parse_email(value: &str) -> Result<String, String> {
    if EMAIL_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err("Email must be a valid email address".to_string())
    }
}

fn parse_website(value: &str) -> Result<String, String> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            Ok(value.to_string())
        }
        _ => Err("Website must be a full URL starting with http:// or https://".to_string()),
    }
}

fn parse_instagram(value: &str) -> Result<String, String> {
    if value.starts_with('@') {
        Ok(value.to_string())
    } else {
        Err("Instagram must start with @".to_string())
    }
}

fn parse_capacity(value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| "Capacity must be a whole number of 0 or more".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::CellValue;

    fn example_with(overrides: &[(&str, CellValue)]) -> RawRow {
        let mut row = SchemaCatalog::example_row();
        for (key, value) in overrides {
            row.cells.insert(key.to_string(), value.clone());
        }
        row
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn errors_for(overrides: &[(&str, CellValue)]) -> Vec<String> {
        RowValidator::new()
            .validate(&example_with(overrides))
            .unwrap_err()
            .errors
    }

    #[test]
    fn test_example_row_is_accepted() {
        let row = RowValidator::new()
            .validate(&SchemaCatalog::example_row())
            .unwrap();
        assert_eq!(row.row_number, 2);
        assert_eq!(row.name, "The Corner Hotel");
        assert_eq!(row.category, Category::Venue);
        assert_eq!(row.state, AustralianState::Vic);
        assert_eq!(row.postcode, "3121");
        assert_eq!(row.latitude, -37.8255);
        assert_eq!(row.capacity, Some(850));
        assert_eq!(row.instagram.as_deref(), Some("@cornerhotel"));
    }

    #[test]
    fn test_required_fields_are_reported() {
        let errors = errors_for(&[
            (columns::NAME, text("  ")),
            (columns::SUBURB, CellValue::Empty),
        ]);
        assert_eq!(errors, vec!["Name is required", "Suburb is required"]);
    }

    #[test]
    fn test_unknown_category_lists_every_value() {
        let errors = errors_for(&[(columns::CATEGORY, text("Not A Real Category"))]);
        assert_eq!(
            errors,
            vec![
                "Category must be one of: Venue, Studio, Festival, Label, Management, \
                 Services, Education, Government/Peak Body, Community Organisation, \
                 Co-working/Creative Hub, Gallery/Arts Space, Other"
            ]
        );
    }

    #[test]
    fn test_state_is_case_insensitive() {
        let row = RowValidator::new()
            .validate(&example_with(&[(columns::STATE, text("nsw"))]))
            .unwrap();
        assert_eq!(row.state, AustralianState::Nsw);

        let errors = errors_for(&[(columns::STATE, text("Victoria"))]);
        assert_eq!(
            errors,
            vec!["State must be one of: VIC, NSW, QLD, SA, WA, TAS, NT, ACT"]
        );
    }

    #[test]
    fn test_postcode_must_be_four_digits() {
        let errors = errors_for(&[(columns::POSTCODE, text("123"))]);
        assert_eq!(errors, vec!["Postcode must be exactly 4 digits"]);

        let errors = errors_for(&[(columns::POSTCODE, text("30a0"))]);
        assert_eq!(errors, vec!["Postcode must be exactly 4 digits"]);

        let row = RowValidator::new()
            .validate(&example_with(&[(columns::POSTCODE, text("3000"))]))
            .unwrap();
        assert_eq!(row.postcode, "3000");
    }

    #[test]
    fn test_numeric_postcode_cell_is_accepted() {
        let row = RowValidator::new()
            .validate(&example_with(&[(columns::POSTCODE, CellValue::Number(3000.0))]))
            .unwrap();
        assert_eq!(row.postcode, "3000");
    }

    #[test]
    fn test_coordinates_are_range_checked() {
        let errors = errors_for(&[
            (columns::LATITUDE, text("-91")),
            (columns::LONGITUDE, text("east")),
        ]);
        assert_eq!(
            errors,
            vec![
                "Latitude must be a number between -90 and 90",
                "Longitude must be a number between -180 and 180",
            ]
        );

        let errors = errors_for(&[(columns::LATITUDE, CellValue::Empty)]);
        assert_eq!(errors, vec!["Latitude is required"]);

        let row = RowValidator::new()
            .validate(&example_with(&[
                (columns::LATITUDE, CellValue::Number(90.0)),
                (columns::LONGITUDE, text("-180")),
            ]))
            .unwrap();
        assert_eq!(row.latitude, 90.0);
        assert_eq!(row.longitude, -180.0);
    }

    #[test]
    fn test_country_defaults_when_blank() {
        let row = RowValidator::new()
            .validate(&example_with(&[(columns::COUNTRY, CellValue::Empty)]))
            .unwrap();
        assert_eq!(row.country, DEFAULT_COUNTRY);
    }

    #[test]
    fn test_optional_fields_are_checked_only_when_present() {
        let row = RowValidator::new()
            .validate(&example_with(&[
                (columns::EMAIL, CellValue::Empty),
                (columns::WEBSITE, text(" ")),
                (columns::INSTAGRAM, CellValue::Empty),
                (columns::CAPACITY, CellValue::Empty),
                (columns::DESCRIPTION, CellValue::Empty),
            ]))
            .unwrap();
        assert_eq!(row.email, None);
        assert_eq!(row.website, None);
        assert_eq!(row.capacity, None);
        assert_eq!(row.description, None);

        let errors = errors_for(&[
            (columns::EMAIL, text("bookings at example.com")),
            (columns::WEBSITE, text("example.com")),
            (columns::INSTAGRAM, text("cornerhotel")),
            (columns::CAPACITY, text("-5")),
        ]);
        assert_eq!(
            errors,
            vec![
                "Email must be a valid email address",
                "Website must be a full URL starting with http:// or https://",
                "Instagram must start with @",
                "Capacity must be a whole number of 0 or more",
            ]
        );
    }

    #[test]
    fn test_instagram_only_needs_leading_at() {
        for handle in ["@", "@x"] {
            let row = RowValidator::new()
                .validate(&example_with(&[(columns::INSTAGRAM, text(handle))]))
                .unwrap();
            assert_eq!(row.instagram.as_deref(), Some(handle));
        }

        let errors = errors_for(&[(columns::INSTAGRAM, text("x@"))]);
        assert_eq!(errors, vec!["Instagram must start with @"]);
    }

    #[test]
    fn test_ftp_website_is_rejected() {
        let errors = errors_for(&[(columns::WEBSITE, text("ftp://example.com"))]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_rejected_row_keeps_present_fields() {
        let mut row = example_with(&[(columns::POSTCODE, text("12"))]);
        row.cells.insert(columns::SUBCATEGORY.into(), CellValue::Empty);
        row.cells.insert("unknown_column".into(), text("ignored"));

        let rejected = RowValidator::new().validate(&row).unwrap_err();
        assert_eq!(rejected.row_number, 2);
        assert_eq!(rejected.field(columns::NAME), "The Corner Hotel");
        assert_eq!(rejected.field(columns::POSTCODE), "12");
        assert!(!rejected.fields.contains_key(columns::SUBCATEGORY));
        assert!(!rejected.fields.contains_key("unknown_column"));
    }

    #[test]
    fn test_validate_all_partitions_in_order() {
        let mut rows = Vec::new();
        for (n, postcode) in ["3000", "bad", "3121", "x"].iter().enumerate() {
            let mut row = example_with(&[(columns::POSTCODE, text(postcode))]);
            row.row_number = n + 2;
            rows.push(row);
        }

        let (accepted, rejected) = RowValidator::new().validate_all(&rows);
        assert_eq!(
            accepted.iter().map(|r| r.row_number).collect::<Vec<_>>(),
            vec![2, 4]
        );
        assert_eq!(
            rejected.iter().map(|r| r.row_number).collect::<Vec<_>>(),
            vec![3, 5]
        );
    }
}
