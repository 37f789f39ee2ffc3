//! Errors from the block-processing state machine.

use primitive_types::U256;
use thiserror::Error;

/// Errors that can occur while replaying a block.
///
/// Every variant is fatal for the block that triggered it (spec §7):
/// there is no recoverable/non-recoverable split, since the policy is
/// that every one of these terminates processing and leaves the
/// previous `state_root` as the last valid snapshot boundary.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// `b.parentHash` did not match the engine's current `head_block_hash`.
    #[error("parent hash mismatch: expected {expected}, got {actual}")]
    ParentHashMismatch { expected: String, actual: String },

    /// `b.number` was neither 0 (with no prior head) nor `head + 1`.
    #[error("unexpected block number: expected {expected}, got {actual}")]
    UnexpectedBlockNumber { expected: String, actual: u64 },

    /// A genesis block did not satisfy the zero-transaction,
    /// zero-uncle, empty-root shape the spec requires.
    #[error("invalid genesis block: {0}")]
    InvalidGenesis(String),

    /// A non-genesis block arrived with no genesis allocation having
    /// ever been applied, or a genesis block arrived without an
    /// allocation file.
    #[error("genesis allocation required but not supplied")]
    MissingGenesisAllocation,

    /// A transaction's declared gas limit was below its intrinsic gas.
    #[error("intrinsic gas {gas} exceeds transaction gas limit {limit}")]
    GasLimitTooLow { gas: u64, limit: u64 },

    /// Sum of per-transaction gas did not equal the header's `gasUsed`.
    #[error("gas used mismatch: computed {computed}, header says {declared}")]
    GasUsedMismatch { computed: u64, declared: u64 },

    /// The final trie root did not match the header's declared `stateRoot`.
    #[error("state root mismatch: computed {computed}, header says {declared}")]
    StateRootMismatch { computed: String, declared: String },

    /// An account debit (sender gas+value, or a credit underflow path)
    /// would have gone negative.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Propagated from sender-address recovery.
    #[error("signature recovery failed: {0}")]
    SignatureRecovery(#[source] chain_crypto::CryptoError),

    /// Propagated from RLP decoding of a block, header, or transaction.
    #[error("primitives decoding error: {0}")]
    Primitives(#[source] chain_primitives::PrimitivesError),

    /// Propagated from RLP decoding of the genesis allocation list itself.
    #[error("rlp error: {0}")]
    Rlp(#[source] rlp_codec::RlpError),

    /// Propagated from the trie or the account records stored in it.
    #[error("trie error: {0}")]
    Trie(#[source] state_trie::TrieError),
}
