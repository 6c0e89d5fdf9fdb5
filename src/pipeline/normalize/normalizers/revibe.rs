//! Normalizer for Revibe exports.
//!
//! Revibe is a single-brand refurbished marketplace: Brand Name is the
//! constant "Apple", Sub-Category carries the device condition, and the
//! channel item name is synthesized from the model and variation columns.
//! All of that is intentional configuration, not enrichment fallout.

use tracing::debug;

use super::super::{
    classify_partners, coerce_numeric_column, compute_gmv, decompose_date, discover_and_rename,
    ColumnSpec, DateStyle, MarketplaceNormalizer,
};
use crate::constants::Marketplace;
use crate::error::Result;
use crate::pipeline::enrich::{enrich, EnrichSpec, JoinKey, MasterField};
use crate::pipeline::master::MasterTable;
use crate::table::Table;

const CANONICAL_COLUMNS: &[&str] = &[
    "Date",
    "Month",
    "Month Number",
    "Year",
    "Order Number",
    "SKU",
    "Status",
    "Partner Id",
    "Nub-Partner",
    "Country",
    "Brand Name",
    "Category",
    "Sub-Category",
    "Channel",
    "Channel Item Name",
    "Partner SKU",
    "Fulfillment",
    "Sales Price",
    "QTY",
    "GMV",
];

/// Source columns used to synthesize the channel item name, dropped after.
const MODEL: &str = "Model";
const VARIATION: &str = "Variation: Color, Storage, Condition";

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { canonical: "Date", variations: &["Last Update Date"] },
    ColumnSpec { canonical: "Order Number", variations: &["id"] },
    ColumnSpec { canonical: "SKU", variations: &["SKU (Old: Order Status)"] },
    ColumnSpec { canonical: "Status", variations: &["Shipment Status"] },
    ColumnSpec { canonical: "Partner Id", variations: &["Supplier"] },
    ColumnSpec { canonical: "Country", variations: &["Country"] },
    ColumnSpec { canonical: "Category", variations: &["Category"] },
    ColumnSpec { canonical: "Sub-Category", variations: &["Condition"] },
    ColumnSpec { canonical: "Sales Price", variations: &["Actual Cost"] },
];

/// Statuses that all denote a completed delivery on this channel.
const STATUSES: &[(&str, &str)] = &[
    ("Shipped", "Delivered"),
    ("At quality check", "Delivered"),
    ("Refused delivery", "Delivered"),
];

const COUNTRIES: &[(&str, &str)] = &[("United Arab Emirates", "UAE")];

const ENRICH_FIELDS: &[(&str, MasterField)] = &[
    ("Brand Name", MasterField::Brand),
    ("Category", MasterField::Category),
    ("Sub-Category", MasterField::SubCategory),
];

pub struct RevibeNormalizer;

impl RevibeNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RevibeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketplaceNormalizer for RevibeNormalizer {
    fn marketplace(&self) -> Marketplace {
        Marketplace::Revibe
    }

    fn canonical_columns(&self) -> &'static [&'static str] {
        CANONICAL_COLUMNS
    }

    fn normalize(&self, mut table: Table, master: &MasterTable) -> Result<Table> {
        discover_and_rename(&mut table, COLUMNS);

        decompose_date(&mut table, DateStyle::DateOnly);

        // Every Revibe supplier is a partner; no fixed lookup table here
        classify_partners(&mut table, "Partner Id", "Nub-Partner", |id| {
            format!("Revibe {id}")
        });

        table.set_column_constant("Brand Name", "Apple");
        table.set_column_constant("Channel", Marketplace::Revibe.channel_name());
        synthesize_item_name(&mut table);

        // Partner SKU mirrors SKU on this channel
        table.ensure_column("Partner SKU");
        table.map_column("SKU", |sku| sku.trim().to_string());
        for row in 0..table.len() {
            let sku = table.get(row, "SKU").unwrap_or("").to_string();
            table.set(row, "Partner SKU", sku);
        }

        table.set_column_constant("Fulfillment", "FBR");

        enrich(
            &mut table,
            master,
            &EnrichSpec {
                key_column: "SKU",
                join_key: JoinKey::Sku,
                fields: ENRICH_FIELDS,
            },
        );

        table.replace_values("Status", STATUSES);
        table.replace_values("Country", COUNTRIES);

        // No exclusion set: every shipment status on this channel is a sale

        coerce_numeric_column(&mut table, "Sales Price", 0.0);
        table.set_column_constant("QTY", "1");
        compute_gmv(&mut table, "Sales Price", "QTY");

        // Chronological output, rows without a date at the end
        table.sort_rows_by_column("Date", |date| {
            if date.is_empty() {
                (1u8, String::new())
            } else {
                (0u8, date.to_string())
            }
        });

        debug!(rows = table.len(), "revibe normalization complete");
        Ok(table.project(CANONICAL_COLUMNS))
    }
}

/// `Channel Item Name` is "{Model} {Variation}" with a single space; when
/// either source column is absent the field stays empty.
fn synthesize_item_name(table: &mut Table) {
    table.ensure_column("Channel Item Name");
    if !table.has_column(MODEL) || !table.has_column(VARIATION) {
        return;
    }
    for row in 0..table.len() {
        let model = table.get(row, MODEL).unwrap_or("").to_string();
        let variation = table.get(row, VARIATION).unwrap_or("").to_string();
        table.set(row, "Channel Item Name", format!("{model} {variation}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(
            [
                "Last Update Date",
                "id",
                "SKU (Old: Order Status)",
                "Shipment Status",
                "Supplier",
                "Country",
                "Category",
                "Condition",
                MODEL,
                VARIATION,
                "Actual Cost",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        );
        t.push_row(
            [
                "05/03/2024",
                "RV-9",
                "RVB-1",
                "At quality check",
                "TechSource",
                "United Arab Emirates",
                "Phones",
                "Excellent",
                "iPhone 13",
                "Blue, 128GB, Excellent",
                "1500",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        );
        t
    }

    #[test]
    fn test_revibe_reference_row() {
        let out = RevibeNormalizer::new()
            .normalize(sample(), &MasterTable::empty())
            .unwrap();
        assert_eq!(out.columns(), CANONICAL_COLUMNS);
        assert_eq!(out.get(0, "Date"), Some("2024-03-05"));
        assert_eq!(out.get(0, "Status"), Some("Delivered"));
        assert_eq!(out.get(0, "Country"), Some("UAE"));
        assert_eq!(out.get(0, "Brand Name"), Some("Apple"));
        assert_eq!(out.get(0, "Sub-Category"), Some("Excellent"));
        assert_eq!(out.get(0, "Nub-Partner"), Some("Revibe TechSource"));
        assert_eq!(
            out.get(0, "Channel Item Name"),
            Some("iPhone 13 Blue, 128GB, Excellent")
        );
        assert_eq!(out.get(0, "Partner SKU"), Some("RVB-1"));
        assert_eq!(out.get(0, "Fulfillment"), Some("FBR"));
        assert_eq!(out.get(0, "GMV"), Some("1500"));
    }

    #[test]
    fn test_revibe_rows_sorted_by_date_missing_last() {
        let mut raw = sample();
        let extra: Vec<String> = [
            "01/02/2024", "RV-1", "RVB-2", "Shipped", "TechSource", "UAE", "Phones",
            "Good", "iPhone 12", "Red, 64GB, Good", "1000",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();
        raw.push_row(extra);
        let undated: Vec<String> = [
            "not a date", "RV-2", "RVB-3", "Shipped", "TechSource", "UAE", "Phones",
            "Good", "iPhone 11", "Black, 64GB, Good", "800",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();
        raw.push_row(undated);

        let out = RevibeNormalizer::new()
            .normalize(raw, &MasterTable::empty())
            .unwrap();
        assert_eq!(out.get(0, "Order Number"), Some("RV-1"));
        assert_eq!(out.get(1, "Order Number"), Some("RV-9"));
        // Unparseable date sorts last with the missing marker
        assert_eq!(out.get(2, "Order Number"), Some("RV-2"));
        assert_eq!(out.get(2, "Date"), Some(""));
    }

    #[test]
    fn test_revibe_item_name_empty_without_model_columns() {
        let mut raw = Table::new(vec!["SKU (Old: Order Status)".into(), "Actual Cost".into()]);
        raw.push_row(vec!["RVB-1".into(), "100".into()]);
        let out = RevibeNormalizer::new()
            .normalize(raw, &MasterTable::empty())
            .unwrap();
        assert_eq!(out.get(0, "Channel Item Name"), Some(""));
        assert_eq!(out.get(0, "Brand Name"), Some("Apple"));
    }
}
