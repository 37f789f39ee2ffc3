use std::collections::HashMap;
use std::sync::RwLock;

use chain_crypto::Hash;

use crate::domain::errors::TrieError;
use crate::domain::store::NodeStore;

/// An in-memory [`NodeStore`], sufficient for a single replay run. A
/// durable backend (e.g. a key-value database) would implement the same
/// trait.
#[derive(Default)]
pub struct InMemoryNodeStore {
    nodes: RwLock<HashMap<Hash, Vec<u8>>>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of every hash/node pair currently held, for
    /// serialization into a [`crate::domain::store`]-external format
    /// (the replay engine's `ProcessorSnapshot`).
    pub fn contents(&self) -> HashMap<Hash, Vec<u8>> {
        self.nodes.read().expect("node store lock poisoned").clone()
    }
}

impl NodeStore for InMemoryNodeStore {
    fn get(&self, hash: &Hash) -> Result<Vec<u8>, TrieError> {
        self.nodes
            .read()
            .expect("node store lock poisoned")
            .get(hash)
            .cloned()
            .ok_or_else(|| TrieError::MissingNode(hex::encode(hash)))
    }

    fn put(&self, hash: Hash, bytes: Vec<u8>) {
        self.nodes
            .write()
            .expect("node store lock poisoned")
            .entry(hash)
            .or_insert(bytes);
    }

    fn len(&self) -> usize {
        self.nodes.read().expect("node store lock poisoned").len()
    }
}
