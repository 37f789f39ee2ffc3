//! # Block-processing state machine
//!
//! The top of the replay engine: decodes blocks via `chain-primitives`,
//! recovers senders via `chain-crypto`, and debits/credits account
//! records in a `state-trie`-backed trie, verifying that the resulting
//! root matches each block header's declared `stateRoot`.
//!
//! [`BlockProcessor`] is the only mutable state in this workspace;
//! everything downstream of it (codec, crypto, trie) is pure or
//! append-only. `process_block` aborts on the first fatal error and
//! leaves the processor at its previous, already-verified state.

pub mod config;
pub mod domain;
pub mod error;
pub mod snapshot;

pub use config::ReplayConfig;
pub use domain::{load_genesis_allocation, BlockProcessor};
pub use error::ReplayError;
pub use snapshot::ProcessorSnapshot;
