//! The cleaning pipeline: read a marketplace export, normalize it against
//! the master product table, and hand back the canonical table.
//!
//! Each invocation is synchronous and self-contained: the input is read
//! fully into memory, the master table is re-read from disk (no caching),
//! and the transform runs to completion or returns the error. There is no
//! shared mutable state between invocations.

pub mod enrich;
pub mod master;
pub mod normalize;
pub mod output;
pub mod reader;

use std::path::Path;

use tracing::info;

use crate::constants::Marketplace;
use crate::error::Result;
use crate::table::Table;
use normalize::NormalizerRegistry;
use reader::InputFormat;

/// Runs one full cleaning operation for a single export file.
///
/// The master path may not exist; enrichment then degrades to a no-op.
/// Read failures (including an unsupported extension) are fatal for this
/// invocation and return the error with no partial output.
pub fn clean_file(
    input: &Path,
    marketplace: Marketplace,
    master_path: &Path,
) -> Result<Table> {
    let span = tracing::info_span!("clean", marketplace = %marketplace, input = %input.display());
    let _enter = span.enter();

    let format = InputFormat::from_path(input)?;
    let master = master::load_master(master_path);
    let raw = reader::read_input(input, format, marketplace.channel_name())?;
    info!(rows = raw.len(), "input read, normalizing");

    let registry = NormalizerRegistry::new();
    let cleaned = registry.normalize(marketplace, raw, &master)?;
    info!(
        rows = cleaned.len(),
        columns = cleaned.columns().len(),
        "cleaning complete"
    );
    Ok(cleaned)
}
