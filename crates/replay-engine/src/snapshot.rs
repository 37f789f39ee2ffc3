//! Serializable snapshot of a [`crate::domain::entities::BlockProcessor`],
//! the external `Snapshot` interface of SPEC §6.
//!
//! Writing this to disk and reading it back is the job of an out-of-scope
//! CLI; this crate only guarantees the serde/bincode round-trip and the
//! `resume` path that reconstructs a processor from it.

use std::collections::HashMap;
use std::sync::Arc;

use chain_crypto::Hash;
use serde::{Deserialize, Serialize};
use state_trie::{InMemoryNodeStore, NodeStore};

use crate::config::ReplayConfig;
use crate::domain::entities::BlockProcessor;

/// A point-in-time capture of a [`BlockProcessor`]'s state sufficient to
/// resume replay at the same head block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessorSnapshot {
    pub head_block_number: Option<u64>,
    pub head_block_hash: Hash,
    pub state_root: Hash,
    pub store_contents: HashMap<Hash, Vec<u8>>,
}

impl ProcessorSnapshot {
    /// Captures the current state of an in-memory-backed processor.
    ///
    /// Requires `InMemoryNodeStore` specifically (rather than any
    /// `NodeStore`) because only it exposes its full contents for
    /// serialization; a disk-backed store wouldn't need this at all.
    pub fn capture(processor: &BlockProcessor<InMemoryNodeStore>) -> Self {
        Self {
            head_block_number: processor.head_block_number(),
            head_block_hash: processor.head_block_hash(),
            state_root: processor.state_root(),
            store_contents: processor.store().contents(),
        }
    }

    /// Rebuilds a processor from this snapshot, ready to process
    /// `head_block_number + 1` (or block 0 if no head was ever reached).
    pub fn restore(self, config: ReplayConfig) -> BlockProcessor<InMemoryNodeStore> {
        let store = InMemoryNodeStore::default();
        for (hash, bytes) in self.store_contents {
            store.put(hash, bytes);
        }
        BlockProcessor::resume(
            Arc::new(store),
            self.state_root,
            self.head_block_number,
            self.head_block_hash,
            config,
        )
    }

    /// Serializes this snapshot with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserializes a snapshot previously produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_through_bincode() {
        let processor = BlockProcessor::new_in_memory(ReplayConfig::default());
        let snapshot = ProcessorSnapshot::capture(&processor);
        let bytes = snapshot.to_bytes().unwrap();
        let restored = ProcessorSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(restored.state_root, snapshot.state_root);
        assert_eq!(restored.head_block_number, snapshot.head_block_number);
    }

    #[test]
    fn restore_reconstructs_processor_at_same_head() {
        let processor = BlockProcessor::new_in_memory(ReplayConfig::default());
        let snapshot = ProcessorSnapshot::capture(&processor);
        let restored = snapshot.restore(ReplayConfig::default());
        assert_eq!(restored.head_block_number(), processor.head_block_number());
        assert_eq!(restored.head_block_hash(), processor.head_block_hash());
        assert_eq!(restored.state_root(), processor.state_root());
    }
}
