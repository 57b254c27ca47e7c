// Minimal single-sheet OOXML workbook writer. Strings go through the shared
// string table; numbers are written as plain numeric cells.

use std::collections::HashMap;
use quick_xml::escape::escape;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::error::{AppError, Result};
use crate::domain::location::CellValue;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="1"><fill><patternFill patternType="none"/></fill></fills><borders count="1"><border/></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs></styleSheet>"#;

/// Write `rows` into a one-sheet `.xlsx` workbook and return its bytes.
pub fn write_workbook(sheet_name: &str, rows: &[Vec<CellValue>]) -> Result<Vec<u8>> {
    let mut strings = SharedStrings::default();
    let sheet_xml = render_sheet(rows, &mut strings);

    let workbook_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(sheet_name)
    );

    let shared_strings_xml = strings.render();
    let parts: [(&str, &str); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", &workbook_xml),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/styles.xml", STYLES),
        ("xl/sharedStrings.xml", &shared_strings_xml),
        ("xl/worksheets/sheet1.xml", &sheet_xml),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (path, content) in parts {
        zip.start_file(path, options)
            .map_err(|e| AppError::Internal(format!("Failed to start workbook part {}: {}", path, e)))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| AppError::Internal(format!("Failed to write workbook part {}: {}", path, e)))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| AppError::Internal(format!("Failed to finish workbook: {}", e)))?;

    Ok(cursor.into_inner())
}

#[derive(Default)]
struct SharedStrings {
    index: HashMap<String, usize>,
    values: Vec<String>,
    references: usize,
}

impl SharedStrings {
    fn intern(&mut self, value: &str) -> usize {
        self.references += 1;
        if let Some(idx) = self.index.get(value) {
            return *idx;
        }
        let idx = self.values.len();
        self.values.push(value.to_string());
        self.index.insert(value.to_string(), idx);
        idx
    }

    fn render(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            self.references,
            self.values.len()
        );
        for value in &self.values {
            xml.push_str(&format!(
                r#"<si><t xml:space="preserve">{}</t></si>"#,
                escape_xml(value)
            ));
        }
        xml.push_str("</sst>");
        xml
    }
}

fn render_sheet(rows: &[Vec<CellValue>], strings: &mut SharedStrings) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for (row_idx, row) in rows.iter().enumerate() {
        let row_number = row_idx + 1;
        xml.push_str(&format!(r#"<row r="{}">"#, row_number));
        for (col_idx, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_name(col_idx), row_number);
            match cell {
                CellValue::Empty => {}
                CellValue::Text(text) => {
                    let idx = strings.intern(text);
                    xml.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, idx));
                }
                CellValue::Number(n) if n.is_finite() => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n));
                }
                CellValue::Number(n) => {
                    let idx = strings.intern(&n.to_string());
                    xml.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, idx));
                }
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Zero-based column index to spreadsheet letters (0 -> A, 26 -> AA)
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

fn escape_xml(value: &str) -> String {
    // Control characters other than tab/newline are not allowed in XML 1.0
    let cleaned: String = value
        .chars()
        .filter(|c| (*c as u32) >= 0x20 || matches!(c, '\t' | '\n' | '\r'))
        .collect();
    escape(cleaned.as_str()).into_owned()
}
