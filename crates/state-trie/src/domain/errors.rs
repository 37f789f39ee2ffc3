use primitive_types::U256;
use rlp_codec::RlpError;
use thiserror::Error;

/// Errors from the trie and the account records stored in it.
///
/// Every variant is fatal for the operation that triggered it; there is no
/// recoverable/non-recoverable split (spec §7) — the caller aborts the
/// containing block and falls back to the last successful snapshot.
#[derive(Debug, Error)]
pub enum TrieError {
    /// `get` dereferenced a hash the store never stored. Indicates store
    /// corruption, not an ordinary missing key — missing keys decode to
    /// the empty string, not an error.
    #[error("node store has no entry for hash {0}")]
    MissingNode(String),

    /// An account's RLP encoding was not a well-formed 4-element list.
    #[error("malformed account record")]
    MalformedAccount,

    /// A debit would have taken the account balance negative.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: U256, available: U256 },

    /// Propagated from the underlying codec while decoding a trie node or
    /// account record.
    #[error("rlp error: {0}")]
    Rlp(#[source] RlpError),

    /// A stored node's tag byte matched none of Branch/Extension/Leaf.
    #[error("malformed trie node encoding")]
    MalformedNode,
}
