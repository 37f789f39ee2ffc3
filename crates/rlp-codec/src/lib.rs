//! # RLP codec and hex-prefix nibble-path encoding
//!
//! This crate provides the two lowest-level components of the replay
//! engine: the canonical Recursive Length Prefix grammar (the wire format
//! for every structure in the system) and the nibble/hex-prefix codec used
//! by the Merkle Patricia Trie to pack its paths.
//!
//! Both codecs are pure, allocation-only transforms with no cryptography
//! and no notion of the trie or the chain above them — everything else in
//! the workspace is built on top of this crate.

mod error;
mod hexprefix;
mod item;
mod nibbles;

pub use error::RlpError;
pub use hexprefix::{common_prefix as hp_common_prefix, get_flag, hp_to_nibbles, nibbles_to_hp};
pub use item::{decode, decode_multiple, decode_u64, encode, encode_u64, encode_uint_be, DecodeMultiple, Item};
pub use nibbles::{bytes_to_nibbles, common_prefix, get_nibble, nibbles_to_bytes, Nibbles};
