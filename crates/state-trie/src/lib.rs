//! # Persistent Merkle Patricia Trie
//!
//! The account state trie: a persistent, content-addressed, compressed
//! hex-trie matching Ethereum's Yellow Paper Appendix D. `Trie::set`
//! returns a new logical trie sharing every unchanged subtree with its
//! predecessor; the underlying [`adapters::memory_db::InMemoryNodeStore`]
//! is append-only.
//!
//! ## Modules
//!
//! - `domain::entities` — the account record stored at each leaf.
//! - `domain::node` — the Branch/Extension/Leaf node shapes and their RLP.
//! - `domain::store` — the content-addressed store contract.
//! - `domain::trie` — the recursive insertion algorithm.
//! - `adapters::memory_db` — the in-memory store adapter.

pub mod adapters;
pub mod domain;

pub use adapters::memory_db::InMemoryNodeStore;
pub use domain::{empty_string_hash, empty_tree_root, Account, NodeStore, Ref, Trie, TrieError, TrieNode};
