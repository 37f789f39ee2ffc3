//! Content-addressed node store: `32-byte hash -> RLP bytes`.
//!
//! Append-only by construction — the same hash always maps to the same
//! bytes, so overwriting is a no-op rather than a hazard. The trie itself
//! never owns node bytes directly; it holds a root hash and a handle to a
//! store.

use crate::domain::errors::TrieError;
use chain_crypto::Hash;

/// Backing storage for trie nodes, addressed by the Keccak-256 hash of
/// their RLP encoding.
pub trait NodeStore {
    /// Looks up a previously-stored node's encoding. Errors if `hash` was
    /// never stored — the trie only ever dereferences hashes it produced
    /// itself, so a miss means store corruption, not an ordinary absence.
    fn get(&self, hash: &Hash) -> Result<Vec<u8>, TrieError>;

    /// Stores `bytes` under `hash`. Idempotent: re-storing the same pair is
    /// a no-op, since the hash is a function of the bytes.
    fn put(&self, hash: Hash, bytes: Vec<u8>);

    /// Number of distinct nodes currently stored.
    fn len(&self) -> usize;

    /// Whether the store holds no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
