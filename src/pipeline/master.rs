//! Master product data: the reference table every normalizer joins against
//! to backfill brand, category, sub-category and product title fields.
//!
//! Loading degrades gracefully by design: an absent or unparsable master file
//! yields an empty table and a warning, never an error, so cleaning proceeds
//! without enrichment rather than failing the whole run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One row of the master product table, SKU keys pre-trimmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterRecord {
    pub sku: String,
    pub partner_sku: String,
    pub brand: String,
    pub category: String,
    pub sub_category: String,
    pub product_titles: String,
}

/// The in-memory master table. Duplicate SKUs are kept as loaded; lookups
/// return the first match in file order (keeping the master unique is the
/// caller's responsibility).
#[derive(Debug, Clone, Default)]
pub struct MasterTable {
    records: Vec<MasterRecord>,
    has_sku: bool,
    has_partner_sku: bool,
}

impl MasterTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the loaded file carried a `SKU` column at all.
    pub fn has_sku(&self) -> bool {
        self.has_sku
    }

    /// Whether the loaded file carried a `Partner SKU` column at all.
    pub fn has_partner_sku(&self) -> bool {
        self.has_partner_sku
    }

    pub fn find_by_sku(&self, sku: &str) -> Option<&MasterRecord> {
        let key = sku.trim();
        if key.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.sku == key)
    }

    pub fn find_by_partner_sku(&self, partner_sku: &str) -> Option<&MasterRecord> {
        let key = partner_sku.trim();
        if key.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.partner_sku == key)
    }
}

/// Loads the master product table from a delimited file with header row
/// `Brand, Category, Sub-Category, Product Titles, SKU, Partner SKU`.
/// Missing file, unreadable file, or malformed rows all degrade to an empty
/// table so the cleaning pipeline can continue without enrichment.
pub fn load_master(path: &Path) -> MasterTable {
    if !path.exists() {
        debug!(path = %path.display(), "no master file, enrichment disabled");
        return MasterTable::empty();
    }
    match try_load(path) {
        Ok(table) => {
            debug!(records = table.len(), "master data loaded");
            table
        }
        Err(err) => {
            warn!("could not load master data ({err}), continuing without enrichment");
            MasterTable::empty()
        }
    }
}

fn try_load(path: &Path) -> crate::error::Result<MasterTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h == name);

    let sku_idx = col("SKU");
    let partner_sku_idx = col("Partner SKU");
    let brand_idx = col("Brand");
    let category_idx = col("Category");
    let sub_category_idx = col("Sub-Category");
    let titles_idx = col("Product Titles");

    let mut table = MasterTable {
        records: Vec::new(),
        has_sku: sku_idx.is_some(),
        has_partner_sku: partner_sku_idx.is_some(),
    };
    for record in reader.records() {
        let record = record?;
        let field = |idx: Option<usize>| -> String {
            idx.and_then(|i| record.get(i)).unwrap_or("").to_string()
        };
        table.records.push(MasterRecord {
            sku: field(sku_idx).trim().to_string(),
            partner_sku: field(partner_sku_idx).trim().to_string(),
            brand: field(brand_idx),
            category: field(category_idx),
            sub_category: field(sub_category_idx),
            product_titles: field(titles_idx),
        });
    }
    Ok(table)
}
