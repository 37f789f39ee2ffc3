//! # Chain wire structures
//!
//! RLP encode/decode for the legacy transaction, block header, and block
//! shapes this engine replays, plus sender recovery on top of
//! `chain-crypto`.

mod block;
mod codec;
mod error;
mod header;
mod transaction;

pub use block::{Block, Uncle};
pub use error::PrimitivesError;
pub use header::BlockHeader;
pub use transaction::Transaction;
