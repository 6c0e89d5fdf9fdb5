use std::collections::HashMap;

use super::normalizers::{
    AmazonNormalizer, NoonNormalizer, RevibeNormalizer, UnsupportedNormalizer,
};
use super::MarketplaceNormalizer;
use crate::constants::Marketplace;
use crate::error::Result;
use crate::pipeline::master::MasterTable;
use crate::table::Table;

/// Registry dispatching each marketplace to its normalization strategy.
/// Every member of the closed marketplace enum has an entry, so dispatch
/// cannot fail for a parsed selector.
pub struct NormalizerRegistry {
    normalizers: HashMap<Marketplace, Box<dyn MarketplaceNormalizer>>,
}

impl NormalizerRegistry {
    /// Creates a registry with all built-in marketplace normalizers.
    pub fn new() -> Self {
        let mut normalizers: HashMap<Marketplace, Box<dyn MarketplaceNormalizer>> = HashMap::new();

        normalizers.insert(Marketplace::Noon, Box::new(NoonNormalizer::new()));
        normalizers.insert(Marketplace::Amazon, Box::new(AmazonNormalizer::new()));
        normalizers.insert(Marketplace::Revibe, Box::new(RevibeNormalizer::new()));
        normalizers.insert(
            Marketplace::Talabat,
            Box::new(UnsupportedNormalizer::new(Marketplace::Talabat)),
        );
        normalizers.insert(
            Marketplace::Careem,
            Box::new(UnsupportedNormalizer::new(Marketplace::Careem)),
        );

        Self { normalizers }
    }

    pub fn get(&self, marketplace: Marketplace) -> &dyn MarketplaceNormalizer {
        self.normalizers
            .get(&marketplace)
            .map(|n| n.as_ref())
            .expect("every marketplace variant is registered")
    }

    /// Normalizes a raw table using the marketplace's strategy.
    pub fn normalize(
        &self,
        marketplace: Marketplace,
        raw: Table,
        master: &MasterTable,
    ) -> Result<Table> {
        self.get(marketplace).normalize(raw, master)
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
