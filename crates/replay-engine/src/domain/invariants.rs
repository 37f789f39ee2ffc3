//! Pure gas-cost and reward-schedule arithmetic.
//!
//! Nothing here touches the trie or the store — these are the formulas
//! [`crate::domain::entities::BlockProcessor::process_block`] applies
//! while walking a block's transactions and uncles.

use chain_primitives::Transaction;
use primitive_types::U256;

use crate::config::ReplayConfig;

fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

/// `21000` plus `4` per zero calldata byte and `68`/`16` per nonzero
/// byte, the latter depending on whether Istanbul is active at `number`.
pub fn intrinsic_gas(tx: &Transaction, number: u64, config: &ReplayConfig) -> u64 {
    tx.intrinsic_gas(config.is_istanbul(number))
}

/// The per-block miner reward before uncle inclusion, per the
/// Byzantium/Constantinople schedule.
pub fn block_reward(number: u64, config: &ReplayConfig) -> U256 {
    if number < config.byzantium_block {
        ether(5)
    } else if number < config.constantinople_block {
        ether(3)
    } else {
        ether(2)
    }
}

/// The bonus a beneficiary earns per included uncle: `floor(reward / 32)`.
pub fn uncle_inclusion_bonus(reward: U256) -> U256 {
    reward / U256::from(32u64)
}

/// The reward paid to an uncle's own beneficiary:
/// `reward + floor((uncle_number - block_number) * reward / 8)`.
///
/// `uncle_number - block_number` is negative (uncles are at most 6
/// generations stale), so this is computed as `reward - floor((block_number
/// - uncle_number) * reward / 8)`.
pub fn uncle_reward(uncle_number: u64, block_number: u64, reward: U256) -> U256 {
    let age = block_number.saturating_sub(uncle_number);
    let penalty = (U256::from(age) * reward) / U256::from(8u64);
    reward.saturating_sub(penalty)
}
