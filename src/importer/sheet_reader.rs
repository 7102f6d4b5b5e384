// ==========================================
// Catalog Import - Tabular Source Adapter
// ==========================================
// Supports: Excel (.xlsx/.xls) / CSV (.csv)
// Contract: first sheet only, all cells as text, blank-like tokens
// ("", " ", tab, newline) normalized to null, source column order
// preserved
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Fixed columns of the catalog row schema; everything else is an
/// attribute column.
pub const FIXED_COLUMNS: [&str; 3] = ["name", "description", "company"];

/// Cell tokens treated as null, matching the source system convention.
fn normalize_blank(raw: &str) -> Option<String> {
    match raw {
        "" | " " | "\t" | "\n" => None,
        _ => Some(raw.to_string()),
    }
}

// ==========================================
// Row - ordered mapping column name -> nullable text
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, Option<String>)>,
}

impl Row {
    pub fn new(cells: Vec<(String, Option<String>)>) -> Self {
        Self { cells }
    }

    /// Cell value by column name; `None` for a missing column or a null cell.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Attribute columns in source order (fixed columns excluded).
    pub fn attribute_cells(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.cells
            .iter()
            .filter(|(name, _)| !FIXED_COLUMNS.contains(&name.as_str()))
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// True when every cell is null.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_none())
    }
}

// ==========================================
// SheetParser - per-format parsing seam
// ==========================================
pub trait SheetParser {
    fn parse(&self, path: &Path) -> ImportResult<Vec<Row>>;
}

// ==========================================
// CSV parser
// ==========================================
pub struct CsvSheetParser;

impl SheetParser for CsvSheetParser {
    fn parse(&self, path: &Path) -> ImportResult<Vec<Row>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate uneven row lengths
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;

            let cells: Vec<(String, Option<String>)> = headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(idx, header)| {
                    let value = record.get(idx).and_then(normalize_blank);
                    (header.clone(), value)
                })
                .collect();

            let row = Row::new(cells);
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel parser
// ==========================================
pub struct ExcelSheetParser;

impl SheetParser for ExcelSheetParser {
    fn parse(&self, path: &Path) -> ImportResult<Vec<Row>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        // First sheet only
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("sheet has no header row".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in sheet_rows {
            let cells: Vec<(String, Option<String>)> = headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(idx, header)| {
                    let value = data_row
                        .get(idx)
                        .map(|cell| cell.to_string())
                        .as_deref()
                        .and_then(normalize_blank);
                    (header.clone(), value)
                })
                .collect();

            let row = Row::new(cells);
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// SheetReader - extension dispatch
// ==========================================
pub struct SheetReader;

impl SheetReader {
    pub fn read<P: AsRef<Path>>(path: P) -> ImportResult<Vec<Row>> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvSheetParser.parse(path),
            "xlsx" | "xls" => ExcelSheetParser.parse(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
