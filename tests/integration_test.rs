//! End-to-end cleaning scenarios: real files in, canonical tables out.

use std::io::Write;
use std::path::PathBuf;

use sales_cleaner::pipeline::{clean_file, output};
use sales_cleaner::Marketplace;
use tempfile::TempDir;

const NOON_HEADER: &str = "order_timestamp,item_nr,sku,status,id_partner,country_code,partner_sku,fulfillment_model,offer_price";

const NOON_COLUMNS: &[&str] = &[
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

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn missing_master() -> PathBuf {
    PathBuf::from("no/such/product.csv")
}

#[test]
fn test_noon_reference_row_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "noon.csv",
        &format!(
            "{NOON_HEADER}\n\
             2024-03-05 10:00:00,NOON100,ABC-1,Shipped,46272,SA,PSKU1,Fulfilled by Noon (FBN),99.99\n"
        ),
    );

    let table = clean_file(&input, Marketplace::Noon, &missing_master()).unwrap();

    // Exact canonical column order, independent of what the source had
    assert_eq!(table.columns(), NOON_COLUMNS);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(0, "Month"), Some("March"));
    assert_eq!(table.get(0, "Month Number"), Some("3"));
    assert_eq!(table.get(0, "Year"), Some("2024"));
    assert_eq!(table.get(0, "Status"), Some("Delivered"));
    assert_eq!(table.get(0, "Country"), Some("Saudi"));
    assert_eq!(table.get(0, "Fullfilment"), Some("FBN"));
    assert_eq!(table.get(0, "Nub Partner"), Some("Nub-Partner 46272"));
    assert_eq!(table.get(0, "QTY"), Some("1"));
    assert_eq!(table.get(0, "GMV"), Some("99.99"));

    // No master file: enrichment fields are empty, never an error
    assert_eq!(table.get(0, "Brand Name"), Some(""));
    assert_eq!(table.get(0, "Category"), Some(""));
}

#[test]
fn test_noon_cancelled_row_has_zero_gmv() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "noon.csv",
        &format!(
            "{NOON_HEADER}\n\
             2024-03-05 10:00:00,NOON100,ABC-1,CIR,46272,SA,PSKU1,Fulfilled by Noon (FBN),99.99\n"
        ),
    );

    let table = clean_file(&input, Marketplace::Noon, &missing_master()).unwrap();
    assert_eq!(table.get(0, "Status"), Some("Cancelled"));
    assert_eq!(table.get(0, "GMV"), Some("0"));
}

#[test]
fn test_noon_enrichment_fills_blank_brand_from_master() {
    let dir = TempDir::new().unwrap();
    let master = write_file(
        &dir,
        "product.csv",
        "Brand,Category,Sub-Category,Product Titles,SKU,Partner SKU\n\
         Acme,Electronics,Audio,Acme Wireless Buds,ABC-1,PSKU1\n",
    );
    let input = write_file(
        &dir,
        "noon.csv",
        &format!(
            "{NOON_HEADER}\n\
             2024-03-05 10:00:00,NOON100,ABC-1,Shipped,46272,SA,PSKU1,Fulfilled by Noon (FBN),99.99\n"
        ),
    );

    let table = clean_file(&input, Marketplace::Noon, &master).unwrap();
    assert_eq!(table.get(0, "Brand Name"), Some("Acme"));
    assert_eq!(table.get(0, "Category"), Some("Electronics"));
    assert_eq!(table.get(0, "Sub-Category"), Some("Audio"));
    // Noon also backfills the channel item name from the product title
    assert_eq!(table.get(0, "Channel Item Name"), Some("Acme Wireless Buds"));
}

#[test]
fn test_noon_filter_is_idempotent_on_output_statuses() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "noon.csv",
        &format!(
            "{NOON_HEADER}\n\
             2024-03-05 10:00:00,N1,ABC-1,Shipped,46272,SA,P1,Fulfilled by Noon (FBN),10\n\
             2024-03-06 10:00:00,N2,ABC-2,Pending,46272,SA,P2,Fulfilled by Noon (FBN),20\n\
             2024-03-07 10:00:00,N3,ABC-3,Processing,46272,SA,P3,Fulfilled by Noon (FBN),30\n"
        ),
    );

    let table = clean_file(&input, Marketplace::Noon, &missing_master()).unwrap();
    assert_eq!(table.len(), 1);
    let excluded = [
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
    for row in 0..table.len() {
        let status = table.get(row, "Status").unwrap();
        assert!(!excluded.contains(&status));
    }
}

fn write_amazon_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("amazon.xlsx");
    let mut book = umya_spreadsheet::new_file();

    let header = ["purchase-date", "amazon-order-id", "sku", "item-status", "item-price", "quantity"];
    let sheets: &[(&str, &[&str])] = &[
        ("SellerA", &["2024-03-01", "A-1", "SKU-A", "Shipped", "100", "1"]),
        ("SellerB", &["2024-03-02", "B-1", "SKU-B", "Shipped", "60", "2"]),
    ];

    for (name, row) in sheets {
        let sheet = book.new_sheet(*name).unwrap();
        for (col, value) in header.iter().enumerate() {
            sheet
                .get_cell_mut((col as u32 + 1, 1))
                .set_value(value.to_string());
        }
        for (col, value) in row.iter().enumerate() {
            sheet
                .get_cell_mut((col as u32 + 1, 2))
                .set_value(value.to_string());
        }
    }
    // Drop the default empty sheet so only the seller sheets remain
    book.remove_sheet_by_name("Sheet1").unwrap();
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
    path
}

#[test]
fn test_amazon_multi_sheet_workbook_concatenates_in_order() {
    let dir = TempDir::new().unwrap();
    let input = write_amazon_workbook(&dir);

    let table = clean_file(&input, Marketplace::Amazon, &missing_master()).unwrap();
    assert_eq!(table.len(), 2);

    // SellerA's rows precede SellerB's, each tagged with its sheet name
    assert_eq!(table.get(0, "Order Number"), Some("A-1"));
    assert_eq!(table.get(0, "Partner ID"), Some("SellerA"));
    assert_eq!(table.get(1, "Order Number"), Some("B-1"));
    assert_eq!(table.get(1, "Partner ID"), Some("SellerB"));

    assert_eq!(table.get(0, "GMV"), Some("100"));
    assert_eq!(table.get(1, "GMV"), Some("120"));
    assert_eq!(table.get(0, "Channel"), Some("Amazon"));
}

#[test]
fn test_unsupported_marketplace_partial_passthrough() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "talabat.csv", "order_ref,amount\nT-1,35\n");

    let table = clean_file(&input, Marketplace::Talabat, &missing_master()).unwrap();
    assert_eq!(table.get(0, "order_ref"), Some("T-1"));
    assert_eq!(table.get(0, "Channel"), Some("Talabat"));
    assert_eq!(table.get(0, "QTY"), Some("1"));
    assert_eq!(table.get(0, "GMV"), Some("0"));
}

#[test]
fn test_unsupported_extension_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "export.pdf", "whatever");
    assert!(clean_file(&input, Marketplace::Noon, &missing_master()).is_err());
}

#[test]
fn test_cleaned_table_serializes_for_download() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "noon.csv",
        &format!(
            "{NOON_HEADER}\n\
             2024-03-05 10:00:00,NOON100,ABC-1,Shipped,46272,SA,PSKU1,Fulfilled by Noon (FBN),99.99\n"
        ),
    );

    let table = clean_file(&input, Marketplace::Noon, &missing_master()).unwrap();
    let csv_text = output::to_csv_string(&table).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(lines.next().unwrap(), NOON_COLUMNS.join(","));
    assert!(lines.next().unwrap().contains("99.99"));

    // Re-reading what we serialized loses nothing
    let reexport = write_file(&dir, "cleaned.csv", &csv_text);
    let mut reader = csv::Reader::from_path(&reexport).unwrap();
    assert_eq!(reader.headers().unwrap().len(), NOON_COLUMNS.len());
    assert_eq!(reader.records().count(), 1);
}
