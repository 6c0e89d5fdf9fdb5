//! Marketplace identifiers used consistently across the CLI, the normalizer
//! registry, and the output naming. The selector is a closed set: unknown
//! values are rejected before the pipeline runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CleanError;

pub const NOON: &str = "Noon";
pub const AMAZON: &str = "Amazon";
pub const REVIBE: &str = "Revibe";
pub const TALABAT: &str = "Talabat";
pub const CAREEM: &str = "Careem";

/// The closed set of supported marketplace channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marketplace {
    Noon,
    Amazon,
    Revibe,
    Talabat,
    Careem,
}

impl Marketplace {
    /// Canonical channel literal written into the `Channel` output column.
    pub fn channel_name(&self) -> &'static str {
        match self {
            Marketplace::Noon => NOON,
            Marketplace::Amazon => AMAZON,
            Marketplace::Revibe => REVIBE,
            Marketplace::Talabat => TALABAT,
            Marketplace::Careem => CAREEM,
        }
    }

    /// All marketplaces the registry knows about.
    pub fn all() -> &'static [Marketplace] {
        &[
            Marketplace::Noon,
            Marketplace::Amazon,
            Marketplace::Revibe,
            Marketplace::Talabat,
            Marketplace::Careem,
        ]
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.channel_name())
    }
}

impl FromStr for Marketplace {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "noon" => Ok(Marketplace::Noon),
            "amazon" => Ok(Marketplace::Amazon),
            "revibe" => Ok(Marketplace::Revibe),
            "talabat" => Ok(Marketplace::Talabat),
            "careem" => Ok(Marketplace::Careem),
            other => Err(CleanError::UnknownMarketplace(other.to_string())),
        }
    }
}
