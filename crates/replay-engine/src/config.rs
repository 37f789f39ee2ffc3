//! Hard-fork constants that change by block number.
//!
//! Replaying different eras of mainnet requires different gas-cost and
//! reward schedules; keeping them in a config rather than literals means
//! historical replay doesn't need recompiling when the range changes.

use serde::Deserialize;

/// Block-number thresholds and schedules the block processor consults.
#[derive(Clone, Debug, Deserialize)]
pub struct ReplayConfig {
    /// First block at which the Istanbul non-zero calldata byte cost (16
    /// gas instead of 68) applies.
    pub istanbul_block: u64,

    /// First block at which the block reward drops from 5 to 3 ether
    /// (the Byzantium schedule change).
    pub byzantium_block: u64,

    /// First block at which the block reward drops from 3 to 2 ether
    /// (the Constantinople schedule change).
    pub constantinople_block: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            istanbul_block: 9_069_000,
            byzantium_block: 4_370_000,
            constantinople_block: 7_280_000,
        }
    }
}

impl ReplayConfig {
    pub(crate) fn is_istanbul(&self, number: u64) -> bool {
        number >= self.istanbul_block
    }
}
