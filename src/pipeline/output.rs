//! Output materialization: a cleaned table becomes UTF-8 comma-separated
//! text with a header row and no index column, byte-for-byte what the
//! download endpoint serves.

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::table::Table;

/// Serializes a table to CSV in memory.
pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_table(table, &mut writer)?;
    let bytes = writer.into_inner().expect("in-memory writer cannot fail");
    Ok(String::from_utf8(bytes).expect("csv output is valid UTF-8"))
}

/// Writes a table to a CSV file at `path`.
pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_table(table, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_table<W: Write>(table: &Table, writer: &mut csv::Writer<W>) -> Result<()> {
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    Ok(())
}
