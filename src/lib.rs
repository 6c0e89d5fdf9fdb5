//! Cleans marketplace sales exports (Noon, Amazon, Revibe) into a canonical
//! tabular schema, enriched from a master product table, with GMV derived
//! per row. Talabat and Careem dispatch to an explicit partial passthrough.

pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod session;
pub mod table;

pub use constants::Marketplace;
pub use error::{CleanError, Result};
pub use pipeline::clean_file;
pub use table::Table;
