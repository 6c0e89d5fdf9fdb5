//! Partial passthrough for marketplaces without cleaning rules yet.
//!
//! Talabat and Careem satisfy the common normalizer contract but only
//! guarantee `Channel`, `QTY` and `GMV`: the remaining input columns pass
//! through untouched. This signals "not yet supported" without raising and
//! without guessing at full cleaning logic.

use tracing::warn;

use super::super::MarketplaceNormalizer;
use crate::constants::Marketplace;
use crate::error::Result;
use crate::pipeline::master::MasterTable;
use crate::table::Table;

/// Columns this variant guarantees; everything else is input passthrough.
const GUARANTEED_COLUMNS: &[&str] = &["Channel", "QTY", "GMV"];

pub struct UnsupportedNormalizer {
    marketplace: Marketplace,
}

impl UnsupportedNormalizer {
    pub fn new(marketplace: Marketplace) -> Self {
        Self { marketplace }
    }
}

impl MarketplaceNormalizer for UnsupportedNormalizer {
    fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    fn canonical_columns(&self) -> &'static [&'static str] {
        GUARANTEED_COLUMNS
    }

    fn normalize(&self, mut table: Table, _master: &MasterTable) -> Result<Table> {
        warn!(
            marketplace = %self.marketplace,
            "cleaning not implemented, returning partial passthrough"
        );
        table.set_column_constant("Channel", self.marketplace.channel_name());
        table.set_column_constant("QTY", "1");
        table.set_column_constant("GMV", "0");
        Ok(table)
    }
}
