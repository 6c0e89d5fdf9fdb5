//! Normalizer for Amazon seller-report exports.
//!
//! Amazon reports arrive with the widest column-name drift of any channel
//! (dashed, underscored, squashed, and title-cased spellings), and often as
//! multi-sheet workbooks where each sheet is one seller account — the reader
//! has already tagged those rows with a `Partner ID`.

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

const CANONICAL_COLUMNS: &[&str] = &[
    "Date",
    "Month",
    "Month Number",
    "Year",
    "Order Number",
    "SKU",
    "Status",
    "Partner ID",
    "Nub Partner",
    "Country",
    "Brand Name",
    "Category",
    "Sub-Category",
    "Channel",
    "Channel Item Name",
    "Partner SKU",
    "Fulfillment",
    "Sales price",
    "QTY",
    "GMV",
];

const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        canonical: "Date",
        variations: &["purchase-date", "purchase_date", "purchasedate", "Purchase Date"],
    },
    ColumnSpec {
        canonical: "Order Number",
        variations: &["amazon-order-id", "amazon_order_id", "amazonorderid", "Amazon Order ID"],
    },
    ColumnSpec {
        canonical: "SKU",
        variations: &["sku", "SKU", "seller-sku", "seller_sku"],
    },
    ColumnSpec {
        canonical: "Status",
        variations: &["item-status", "item_status", "itemstatus", "Item Status"],
    },
    ColumnSpec {
        canonical: "Country",
        variations: &["ship-country", "ship_country", "shipcountry", "Ship Country"],
    },
    ColumnSpec {
        canonical: "Channel",
        variations: &["sales-channel", "sales_channel", "saleschannel", "Sales Channel"],
    },
    ColumnSpec {
        canonical: "Channel Item Name",
        variations: &["product-name", "product_name", "productname", "Product Name"],
    },
    ColumnSpec {
        canonical: "Partner SKU",
        variations: &["asin", "ASIN"],
    },
    ColumnSpec {
        canonical: "Fulfillment",
        variations: &[
            "fulfillment-channel",
            "fulfillment_channel",
            "fulfillmentchannel",
            "Fulfillment Channel",
        ],
    },
    ColumnSpec {
        canonical: "Sales price",
        variations: &["item-price", "item_price", "itemprice", "Item Price"],
    },
    ColumnSpec {
        canonical: "QTY",
        variations: &["quantity", "Quantity"],
    },
];

/// Seller accounts with a known Nub label.
const KNOWN_PARTNERS: &[&str] = &["Wishcare", "100 MPH", "100_Miles"];

const COUNTRIES: &[(&str, &str)] = &[
    ("SA", "Saudi"),
    ("AE", "UAE"),
    ("BH", "Bahrain"),
    ("KW", "Kuwait"),
    ("OM", "Oman"),
    ("sa", "Saudi"),
    ("ae", "UAE"),
    ("bh", "Bahrain"),
    ("kw", "Kuwait"),
    ("om", "Oman"),
];

/// Regional storefront labels all collapse to the bare channel name.
const CHANNELS: &[(&str, &str)] = &[
    ("Amazon.ae", "Amazon"),
    ("Amazon.sa", "Amazon"),
    ("Amazon.eg", "Amazon"),
    ("amazon.ae", "Amazon"),
    ("amazon.sa", "Amazon"),
];

const STATUSES: &[(&str, &str)] = &[("Shipped", "Delivered")];

const FULFILLMENTS: &[(&str, &str)] = &[
    ("Amazon", "FBA"),
    ("amazon", "FBA"),
    ("Amazon.com", "FBA"),
];

const IRRELEVANT_STATUSES: &[&str] = &[
    "Unshipped",
    "Pending",
    "Undelivered",
    "Confirmed",
    "Created",
    "Exported",
    "Fulfilling",
];

const ENRICH_FIELDS: &[(&str, MasterField)] = &[
    ("Brand Name", MasterField::Brand),
    ("Category", MasterField::Category),
    ("Sub-Category", MasterField::SubCategory),
];

pub struct AmazonNormalizer;

impl AmazonNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmazonNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketplaceNormalizer for AmazonNormalizer {
    fn marketplace(&self) -> Marketplace {
        Marketplace::Amazon
    }

    fn canonical_columns(&self) -> &'static [&'static str] {
        CANONICAL_COLUMNS
    }

    fn normalize(&self, mut table: Table, master: &MasterTable) -> Result<Table> {
        discover_and_rename(&mut table, COLUMNS);

        decompose_date(&mut table, DateStyle::DateOnly);

        classify_partners(&mut table, "Partner ID", "Nub Partner", |id| {
            if KNOWN_PARTNERS.contains(&id) {
                format!("Nub-Partner {id}")
            } else {
                "Null".to_string()
            }
        });

        table.ensure_column("Brand Name");
        table.ensure_column("Category");
        table.ensure_column("Sub-Category");
        if !table.has_column("Channel") {
            table.set_column_constant("Channel", Marketplace::Amazon.channel_name());
        }
        table.ensure_column("Channel Item Name");
        table.ensure_column("Partner SKU");
        table.ensure_column("Fulfillment");

        // SKU first; when the master table has no SKU column at all, fall
        // back to matching the report SKU against the master Partner SKU
        table.map_column("SKU", |sku| sku.trim().to_string());
        let join_key = if master.has_sku() {
            JoinKey::Sku
        } else {
            JoinKey::PartnerSku
        };
        enrich(
            &mut table,
            master,
            &EnrichSpec {
                key_column: "SKU",
                join_key,
                fields: ENRICH_FIELDS,
            },
        );

        table.replace_values("Country", COUNTRIES);
        table.replace_values("Channel", CHANNELS);
        table.replace_values("Status", STATUSES);
        table.replace_values("Fulfillment", FULFILLMENTS);

        filter_statuses(&mut table, IRRELEVANT_STATUSES);

        coerce_numeric_column(&mut table, "Sales price", 0.0);
        coerce_numeric_column(&mut table, "QTY", 1.0);
        compute_gmv(&mut table, "Sales price", "QTY");

        // Amazon rule: cancelled orders force QTY back to one; GMV stays as
        // computed. Deliberately different from the Noon GMV-zeroing rule.
        for row in 0..table.len() {
            if is_cancelled(table.get(row, "Status").unwrap_or("")) {
                table.set(row, "QTY", "1".to_string());
            }
        }

        debug!(rows = table.len(), "amazon normalization complete");
        Ok(table.project(CANONICAL_COLUMNS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut t = Table::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            t.push_row(row.iter().map(|c| c.to_string()).collect());
        }
        t
    }

    fn sample() -> Table {
        raw_table(
            &[
                "purchase-date",
                "amazon-order-id",
                "sku",
                "item-status",
                "ship-country",
                "sales-channel",
                "product-name",
                "asin",
                "fulfillment-channel",
                "item-price",
                "quantity",
                "Partner ID",
            ],
            &[&[
                "2024-03-05T08:30:00Z",
                "171-555",
                "AMZ-1",
                "Shipped",
                "AE",
                "Amazon.ae",
                "Wireless Earbuds",
                "B0TEST",
                "Amazon",
                "120",
                "2",
                "Wishcare",
            ]],
        )
    }

    #[test]
    fn test_amazon_column_variations_resolve() {
        // Underscored spellings resolve to the same canonical fields
        let raw = raw_table(
            &["purchase_date", "amazon_order_id", "seller_sku", "Partner ID"],
            &[&["2024-03-05", "171-555", "AMZ-1", "Wishcare"]],
        );
        let out = AmazonNormalizer::new()
            .normalize(raw, &MasterTable::empty())
            .unwrap();
        assert_eq!(out.columns(), CANONICAL_COLUMNS);
        assert_eq!(out.get(0, "Order Number"), Some("171-555"));
        assert_eq!(out.get(0, "SKU"), Some("AMZ-1"));
    }

    #[test]
    fn test_amazon_reference_row() {
        let out = AmazonNormalizer::new()
            .normalize(sample(), &MasterTable::empty())
            .unwrap();
        assert_eq!(out.columns(), CANONICAL_COLUMNS);
        assert_eq!(out.get(0, "Date"), Some("2024-03-05"));
        assert_eq!(out.get(0, "Status"), Some("Delivered"));
        assert_eq!(out.get(0, "Country"), Some("UAE"));
        assert_eq!(out.get(0, "Channel"), Some("Amazon"));
        assert_eq!(out.get(0, "Fulfillment"), Some("FBA"));
        assert_eq!(out.get(0, "Nub Partner"), Some("Nub-Partner Wishcare"));
        assert_eq!(out.get(0, "Partner SKU"), Some("B0TEST"));
        assert_eq!(out.get(0, "QTY"), Some("2"));
        assert_eq!(out.get(0, "GMV"), Some("240"));
    }

    #[test]
    fn test_amazon_cancelled_forces_qty_not_gmv() {
        let mut raw = sample();
        raw.set(0, "item-status", "Cancelled".to_string());
        let out = AmazonNormalizer::new()
            .normalize(raw, &MasterTable::empty())
            .unwrap();
        // QTY is overridden to 1; GMV keeps the computed value
        assert_eq!(out.get(0, "QTY"), Some("1"));
        assert_eq!(out.get(0, "GMV"), Some("240"));
    }

    #[test]
    fn test_amazon_missing_channel_defaults_to_literal() {
        let raw = raw_table(
            &["sku", "item-price", "Partner ID"],
            &[&["AMZ-1", "10", "SellerA"]],
        );
        let out = AmazonNormalizer::new()
            .normalize(raw, &MasterTable::empty())
            .unwrap();
        assert_eq!(out.get(0, "Channel"), Some("Amazon"));
        assert_eq!(out.get(0, "Nub Partner"), Some("Null"));
    }

    #[test]
    fn test_amazon_partner_sku_fallback_join() {
        use crate::pipeline::master::load_master;
        use std::io::Write;

        // Master file without a SKU column: the report SKU is matched
        // against the master Partner SKU instead
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "Brand,Category,Sub-Category,Product Titles,Partner SKU\n\
             Acme,Electronics,Audio,Acme Buds,AMZ-1\n"
        )
        .unwrap();
        let master = load_master(file.path());
        assert!(!master.has_sku());

        let out = AmazonNormalizer::new().normalize(sample(), &master).unwrap();
        assert_eq!(out.get(0, "Brand Name"), Some("Acme"));
    }

    #[test]
    fn test_amazon_exclusion_set_enforced() {
        let mut raw = sample();
        raw.set(0, "item-status", "Unshipped".to_string());
        let out = AmazonNormalizer::new()
            .normalize(raw, &MasterTable::empty())
            .unwrap();
        assert!(out.is_empty());
    }
}
