//! Keccak-256 hashing.
//!
//! This is the Ethereum-flavor Keccak padding, not NIST SHA3-256 — `sha3`
//! exposes the two separately, and `Keccak256` is the one whose test
//! vectors match `keccak256(b"") == c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470`.

use sha3::{Digest, Keccak256};

/// A 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

/// Hashes `data` with Keccak-256.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// `keccak256("")`, the default account's `code_hash`.
pub fn empty_string_hash() -> Hash {
    keccak256(&[])
}
