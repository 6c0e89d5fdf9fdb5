//! Enrichment join: backfills blank product fields from the master table.
//!
//! This is a left join on trimmed-string key equality with one hard rule:
//! only fields that are currently blank in the cleaned table are filled from
//! a match. Non-blank values are never overridden, a miss leaves the field
//! blank, and no join helper columns appear in the output.

use tracing::debug;

use crate::pipeline::master::{MasterRecord, MasterTable};
use crate::table::Table;

/// Which master field feeds a given output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterField {
    Brand,
    Category,
    SubCategory,
    ProductTitles,
}

impl MasterField {
    fn value<'a>(&self, record: &'a MasterRecord) -> &'a str {
        match self {
            MasterField::Brand => &record.brand,
            MasterField::Category => &record.category,
            MasterField::SubCategory => &record.sub_category,
            MasterField::ProductTitles => &record.product_titles,
        }
    }
}

/// Which master key the left table's key column is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKey {
    Sku,
    PartnerSku,
}

/// Join description: the left key column, the master key to match it
/// against, and the (output column, master field) pairs to backfill.
pub struct EnrichSpec<'a> {
    pub key_column: &'a str,
    pub join_key: JoinKey,
    pub fields: &'a [(&'a str, MasterField)],
}

/// Fills blank target fields from the master table. With an empty master
/// this is a no-op, mirroring the degrade-gracefully loading policy.
pub fn enrich(table: &mut Table, master: &MasterTable, spec: &EnrichSpec) {
    if master.is_empty() || !table.has_column(spec.key_column) {
        return;
    }
    for (target, _) in spec.fields {
        table.ensure_column(target);
    }

    let mut filled = 0usize;
    for row in 0..table.len() {
        let key = table.get(row, spec.key_column).unwrap_or("").to_string();
        let hit = match spec.join_key {
            JoinKey::Sku => master.find_by_sku(&key),
            JoinKey::PartnerSku => master.find_by_partner_sku(&key),
        };
        let Some(record) = hit else { continue };
        for (target, field) in spec.fields {
            let current = table.get(row, target).unwrap_or("");
            if current.trim().is_empty() {
                let value = field.value(record);
                if !value.is_empty() {
                    table.set(row, *target, value.to_string());
                    filled += 1;
                }
            }
        }
    }
    debug!(filled, "enrichment join complete");
}
