//! Per-marketplace normalization: the shared contract plus the step helpers
//! every marketplace variant is assembled from.
//!
//! Each variant discovers its source columns under known name variations,
//! renames them to canonical field names, derives date parts and partner
//! labels, joins against master data, remaps coded values, filters
//! operationally-irrelevant statuses, computes QTY and GMV, and finally
//! projects onto its fixed canonical column order. Missing source columns
//! degrade to empty fields with a warning; they never abort a run.

pub mod dates;
pub mod registry;
pub mod normalizers;

use tracing::warn;

use crate::constants::Marketplace;
use crate::error::Result;
use crate::pipeline::master::MasterTable;
use crate::table::Table;

pub use registry::NormalizerRegistry;

/// A canonical field and the source-column spellings it may arrive under,
/// in match priority order. Kept as data so adding a marketplace or a new
/// export spelling is a table edit, not new code.
pub struct ColumnSpec {
    pub canonical: &'static str,
    pub variations: &'static [&'static str],
}

/// The common contract: one stateless transform per marketplace. Every
/// invocation is independent; there is no cross-file accumulation.
pub trait MarketplaceNormalizer: Send + Sync {
    fn marketplace(&self) -> Marketplace;

    /// The fixed, ordered output column set for this marketplace.
    fn canonical_columns(&self) -> &'static [&'static str];

    /// Transforms a raw export table into the canonical shape, enriching
    /// from the master table where fields are blank.
    fn normalize(&self, raw: Table, master: &MasterTable) -> Result<Table>;
}

/// Renames each discovered source column to its canonical name. The first
/// matching variation wins; a field with no matching source column is left
/// for the final projection to fill with empty values.
pub(crate) fn discover_and_rename(table: &mut Table, specs: &[ColumnSpec]) {
    for spec in specs {
        match spec.variations.iter().find(|v| table.has_column(v)) {
            Some(found) => table.rename_column(found, spec.canonical),
            None => warn!(
                field = spec.canonical,
                "no source column found, field will be empty"
            ),
        }
    }
}

/// How the normalized `Date` cell is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateStyle {
    /// Keep the full timestamp (`2024-03-05 10:00:00`).
    Timestamp,
    /// Date part only (`2024-03-05`).
    DateOnly,
}

/// Parses the `Date` column permissively and derives `Month` (full name),
/// `Month Number` and `Year`. Rows whose date does not parse get the
/// missing-date marker (empty string) in all four cells.
pub(crate) fn decompose_date(table: &mut Table, style: DateStyle) {
    table.ensure_column("Month");
    table.ensure_column("Month Number");
    table.ensure_column("Year");
    if !table.has_column("Date") {
        return;
    }
    for row in 0..table.len() {
        let raw = table.get(row, "Date").unwrap_or("").to_string();
        match dates::parse_flexible(&raw) {
            Some(dt) => {
                use chrono::Datelike;
                let rendered = match style {
                    DateStyle::Timestamp => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
                    DateStyle::DateOnly => dt.format("%Y-%m-%d").to_string(),
                };
                table.set(row, "Date", rendered);
                table.set(row, "Month", dates::month_name(dt.month()).to_string());
                table.set(row, "Month Number", dt.month().to_string());
                table.set(row, "Year", dt.year().to_string());
            }
            None => {
                table.set(row, "Date", String::new());
                table.set(row, "Month", String::new());
                table.set(row, "Month Number", String::new());
                table.set(row, "Year", String::new());
            }
        }
    }
}

/// Derives a partner label column from a raw partner identifier column via a
/// per-marketplace labeling rule. An absent source column leaves the label
/// column empty.
pub(crate) fn classify_partners<F: Fn(&str) -> String>(
    table: &mut Table,
    source: &str,
    target: &str,
    label: F,
) {
    table.ensure_column(target);
    if !table.has_column(source) {
        warn!(column = source, "no partner identifier column to classify");
        return;
    }
    for row in 0..table.len() {
        let id = table.get(row, source).unwrap_or("").to_string();
        table.set(row, target, label(id.trim()));
    }
}

/// Drops rows whose `Status` is in the marketplace's irrelevant set
/// (pending/unshipped/processing-type statuses). Idempotent by construction.
pub(crate) fn filter_statuses(table: &mut Table, excluded: &[&str]) {
    if !table.has_column("Status") {
        return;
    }
    let before = table.len();
    table.retain_rows(|get| {
        let status = get("Status");
        !excluded.iter().any(|e| *e == status)
    });
    let dropped = before - table.len();
    if dropped > 0 {
        tracing::debug!(dropped, "filtered operationally-irrelevant statuses");
    }
}

/// Numeric value of a price/qty cell; anything non-numeric coerces to the
/// fallback.
pub(crate) fn parse_number(cell: &str, fallback: f64) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(fallback)
}

/// Renders a derived numeric, dropping a trailing ".0" on whole numbers so
/// quantities and zero GMV stay integral in the output.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Rewrites a numeric column in place, coercing non-numeric cells to the
/// fallback value.
pub(crate) fn coerce_numeric_column(table: &mut Table, column: &str, fallback: f64) {
    table.ensure_column(column);
    table.map_column(column, |cell| format_number(parse_number(cell, fallback)));
}

/// Computes `GMV = price * qty` per row into a `GMV` column. Both inputs are
/// read as numbers with coercion fallbacks of 0 (price) and 1 (qty).
pub(crate) fn compute_gmv(table: &mut Table, price_column: &str, qty_column: &str) {
    table.ensure_column("GMV");
    for row in 0..table.len() {
        let price = parse_number(table.get(row, price_column).unwrap_or(""), 0.0);
        let qty = parse_number(table.get(row, qty_column).unwrap_or(""), 1.0);
        table.set(row, "GMV", format_number(price * qty));
    }
}

/// Whether a normalized status counts as cancelled for the per-marketplace
/// cancelled-order overrides.
pub(crate) fn is_cancelled(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case("CANCELLED")
}
