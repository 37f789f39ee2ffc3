//! secp256k1 ECDSA sender recovery.
//!
//! Curve and field arithmetic are delegated entirely to `k256`, per the
//! spec's explicit allowance to reuse a vetted library for this component;
//! this module only sequences the recovery contract
//! (`recover_public_key(hash, v, r, s)`) and the address derivation on top
//! of it.
//!
//! Two checks the donor workspace's equivalent module performs are
//! deliberately *not* carried over: EIP-2 low-S rejection and a signature
//! "entropy" heuristic. Both would reject legitimately-signed historical
//! mainnet transactions that predate EIP-2, which this engine must be able
//! to replay.

use crate::errors::CryptoError;
use crate::hashing::keccak256;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

/// A 20-byte account address.
pub type Address = [u8; 20];

/// Maps a legacy transaction's `v` (27 or 28) to the 0/1 recovery id
/// `k256` expects. No chain-id offset: EIP-155 envelopes are out of scope.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    match v {
        27 => Ok(RecoveryId::new(false, false)),
        28 => Ok(RecoveryId::new(true, false)),
        other => Err(CryptoError::InvalidRecoveryId(other)),
    }
}

/// Recovers the 20-byte sender address from a message hash and an
/// ECDSA `(v, r, s)` signature over secp256k1.
///
/// `hash` is the Keccak-256 digest the signature was produced over (for a
/// transaction, `keccak256(rlp(signing_fields))`); `r` and `s` are 32-byte
/// big-endian scalars.
pub fn recover_address(
    hash: &[u8; 32],
    v: u8,
    r: &[u8; 32],
    s: &[u8; 32],
) -> Result<Address, CryptoError> {
    let recovery_id = parse_recovery_id(v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(r);
    sig_bytes[32..].copy_from_slice(s);
    let signature = Signature::from_slice(&sig_bytes).map_err(|_| CryptoError::InvalidScalar)?;

    let verifying_key = VerifyingKey::recover_from_prehash(hash, &signature, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(address_from_public_key(&verifying_key))
}

/// Derives the 20-byte Ethereum address from a recovered public key:
/// `keccak256(x‖y)[12:]`, the uncompressed point with its `0x04` tag byte
/// stripped.
pub fn address_from_public_key(key: &VerifyingKey) -> Address {
    let encoded = key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
