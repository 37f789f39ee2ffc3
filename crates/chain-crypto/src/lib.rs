//! # Hashing and signature recovery
//!
//! Keccak-256 hashing and secp256k1 ECDSA sender recovery for legacy
//! (pre-EIP-155) Ethereum transactions. Everything above this crate treats
//! hashes and addresses as opaque byte arrays; this crate is the only place
//! that touches `sha3`/`k256` directly.

mod ecdsa;
mod errors;
mod hashing;

pub use ecdsa::{address_from_public_key, recover_address, Address};
pub use errors::CryptoError;
pub use hashing::{empty_string_hash, keccak256, Hash};
