//! Input reading for marketplace exports.
//!
//! Whatever the source format, the result is a `Table` of untouched string
//! cells: dates and prices stay text until the normalizer's explicit
//! conversion steps. Spreadsheets with several worksheets are concatenated in
//! worksheet order, each row tagged with its sheet name as the partner
//! identifier; a workbook that cannot be opened gets one retry as delimited
//! text before the read is treated as fatal.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, warn};

use crate::error::{CleanError, Result};
use crate::table::Table;

/// Output column carrying the partner identifier for every row.
pub const PARTNER_ID: &str = "Partner ID";

/// Source-column spellings recognized as an existing partner identifier.
const PARTNER_ID_VARIATIONS: &[&str] = &["Partner ID", "Partner", "partner_id"];

/// Declared format of an uploaded export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Xlsx,
    Xls,
}

impl InputFormat {
    /// Derives the format from a file extension; anything outside the
    /// supported set is rejected up front.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" => Ok(InputFormat::Xlsx),
            "xls" => Ok(InputFormat::Xls),
            _ => Err(CleanError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn is_workbook(&self) -> bool {
        matches!(self, InputFormat::Xlsx | InputFormat::Xls)
    }
}

/// Reads a marketplace export into an all-string table.
///
/// `default_partner` is used to tag rows when the input itself carries no
/// partner identifier (plain CSV, or the CSV fallback of a broken workbook).
pub fn read_input(path: &Path, format: InputFormat, default_partner: &str) -> Result<Table> {
    let mut table = if format.is_workbook() {
        match read_workbook(path) {
            Ok(table) => table,
            Err(err) => {
                // One fallback: some "Excel" exports are really delimited text
                warn!("workbook read failed ({err}), retrying as delimited text");
                read_delimited(path)?
            }
        }
    } else {
        read_delimited(path)?
    };

    ensure_partner_column(&mut table, default_partner);
    debug!(
        rows = table.len(),
        columns = table.columns().len(),
        "input loaded"
    );
    Ok(table)
}

/// Reads a comma-delimited file, keeping every cell as its original string.
fn read_delimited(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(|c| c.to_string()).collect());
    }
    Ok(table)
}

/// Reads every worksheet of a workbook, tagging rows with the sheet name and
/// concatenating in worksheet order. A sheet that fails to read is skipped
/// with a warning; a workbook with no readable sheet is an error (the caller
/// then falls back to delimited text once).
fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut combined = Table::default();
    let mut readable_sheets = 0;
    for name in &sheet_names {
        let range = match workbook.worksheet_range(name) {
            Ok(range) => range,
            Err(err) => {
                warn!(sheet = %name, "skipping unreadable worksheet: {err}");
                continue;
            }
        };
        let mut sheet_table = range_to_table(&range);
        drop_duplicate_header_row(&mut sheet_table);
        sheet_table.set_column_constant(PARTNER_ID, name);
        combined.append(sheet_table);
        readable_sheets += 1;
    }

    if readable_sheets == 0 {
        return Err(CleanError::EmptyInput(path.display().to_string()));
    }
    Ok(combined)
}

/// First row is the header; remaining rows become string cells.
fn range_to_table(range: &calamine::Range<Data>) -> Table {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => return Table::default(),
    };
    let mut table = Table::new(headers);
    for row in rows {
        table.push_row(row.iter().map(cell_to_string).collect());
    }
    table
}

/// Some exports repeat the header literally as the first data row; drop it.
fn drop_duplicate_header_row(table: &mut Table) {
    if table.is_empty() {
        return;
    }
    let header: Vec<String> = table.columns().to_vec();
    if table.rows()[0] == header {
        table.remove_row(0);
    }
}

/// Stringifies a spreadsheet cell without type coercion beyond rendering.
/// Integral floats lose their ".0" so identifiers survive Excel round-trips.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Guarantees a `Partner ID` column: an existing spelling variant is renamed,
/// otherwise every row is tagged with the marketplace default.
fn ensure_partner_column(table: &mut Table, default_partner: &str) {
    for variant in PARTNER_ID_VARIATIONS {
        if table.has_column(variant) {
            table.rename_column(variant, PARTNER_ID);
            return;
        }
    }
    table.set_column_constant(PARTNER_ID, default_partner);
}
