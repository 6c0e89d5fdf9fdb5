//! Normalizer for Noon sales exports.

use tracing::debug;

use super::super::{
    classify_partners, coerce_numeric_column, compute_gmv, decompose_date, discover_and_rename,
    filter_statuses, is_cancelled, ColumnSpec, DateStyle, MarketplaceNormalizer,
};
use crate::constants::Marketplace;
use crate::error::Result;
use crate::pipeline::enrich::{enrich, EnrichSpec, JoinKey, MasterField};
use crate::pipeline::master::MasterTable;
use crate::table::Table;

/// Fixed output column order. `Fullfilment` and `Sales_Price` spellings are
/// part of the downstream contract.
const CANONICAL_COLUMNS: &[&str] = &[
    "Date",
    "Month",
    "Month Number",
    "Year",
    "Order Number",
    "SKU",
    "Status",
    "Partner Id",
    "Nub Partner",
    "Country",
    "Brand Name",
    "Category",
    "Sub-Category",
    "Channel",
    "Channel Item Name",
    "Partner SKU",
    "Fullfilment",
    "Sales_Price",
    "QTY",
    "GMV",
];

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec { canonical: "Date", variations: &["order_timestamp"] },
    ColumnSpec { canonical: "Order Number", variations: &["item_nr"] },
    ColumnSpec { canonical: "SKU", variations: &["sku"] },
    ColumnSpec { canonical: "Status", variations: &["status"] },
    ColumnSpec { canonical: "Partner Id", variations: &["id_partner"] },
    ColumnSpec { canonical: "Country", variations: &["country_code"] },
    ColumnSpec { canonical: "Partner SKU", variations: &["partner_sku"] },
    ColumnSpec { canonical: "Fullfilment", variations: &["fulfillment_model"] },
    ColumnSpec { canonical: "Sales_Price", variations: &["offer_price"] },
];

/// Partner ids with a known Nub label; anything else classifies as "Null".
const KNOWN_PARTNERS: &[&str] = &["46272", "181587", "47461", "74949"];

const COUNTRIES: &[(&str, &str)] = &[("SA", "Saudi"), ("AE", "UAE")];

const STATUSES: &[(&str, &str)] = &[("Shipped", "Delivered"), ("CIR", "Cancelled")];

const FULFILLMENTS: &[(&str, &str)] = &[
    ("Fulfilled by Noon (FBN)", "FBN"),
    ("Fulfilled by Partner (FBP)", "FBP"),
];

/// Statuses that do not represent a completed or actionable sale.
const IRRELEVANT_STATUSES: &[&str] = &[
    "Unshipped",
    "Pending",
    "Undelivered",
    "Confirmed",
    "Created",
    "Exported",
    "Fulfilling",
    "Could Not Be Delivered",
    "Processing",
];

const ENRICH_FIELDS: &[(&str, MasterField)] = &[
    ("Brand Name", MasterField::Brand),
    ("Category", MasterField::Category),
    ("Sub-Category", MasterField::SubCategory),
    ("Channel Item Name", MasterField::ProductTitles),
];

pub struct NoonNormalizer;

impl NoonNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoonNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketplaceNormalizer for NoonNormalizer {
    fn marketplace(&self) -> Marketplace {
        Marketplace::Noon
    }

    fn canonical_columns(&self) -> &'static [&'static str] {
        CANONICAL_COLUMNS
    }

    fn normalize(&self, mut table: Table, master: &MasterTable) -> Result<Table> {
        discover_and_rename(&mut table, COLUMNS);

        decompose_date(&mut table, DateStyle::Timestamp);

        classify_partners(&mut table, "Partner Id", "Nub Partner", |id| {
            if KNOWN_PARTNERS.contains(&id) {
                format!("Nub-Partner {id}")
            } else {
                "Null".to_string()
            }
        });

        table.ensure_column("Brand Name");
        table.ensure_column("Category");
        table.ensure_column("Sub-Category");
        table.set_column_constant("Channel", Marketplace::Noon.channel_name());
        table.ensure_column("Channel Item Name");

        table.map_column("SKU", |sku| sku.trim().to_string());
        enrich(
            &mut table,
            master,
            &EnrichSpec {
                key_column: "SKU",
                join_key: JoinKey::Sku,
                fields: ENRICH_FIELDS,
            },
        );

        table.replace_values("Country", COUNTRIES);
        table.replace_values("Status", STATUSES);
        table.replace_values("Fullfilment", FULFILLMENTS);

        filter_statuses(&mut table, IRRELEVANT_STATUSES);

        coerce_numeric_column(&mut table, "Sales_Price", 0.0);
        table.set_column_constant("QTY", "1");
        compute_gmv(&mut table, "Sales_Price", "QTY");

        // Noon rule: cancelled orders keep their price but contribute no GMV
        for row in 0..table.len() {
            if is_cancelled(table.get(row, "Status").unwrap_or("")) {
                table.set(row, "GMV", "0".to_string());
            }
        }

        debug!(rows = table.len(), "noon normalization complete");
        Ok(table.project(CANONICAL_COLUMNS))
    }
}
