//! Sender recovery exercised through the crate boundary, independent of
//! `chain-crypto`'s own unit tests.

use chain_crypto::{address_from_public_key, keccak256, recover_address};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, SigningKey};

fn sign(hash: &[u8; 32], key: &SigningKey) -> (u8, [u8; 32], [u8; 32]) {
    let (sig, recovery_id): (Signature, RecoveryId) = key.sign_prehash_recoverable(hash).unwrap();
    let bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    let v = if recovery_id.is_y_odd() { 28 } else { 27 };
    (v, r, s)
}

#[test]
fn recovered_address_matches_the_signing_key() {
    let key = SigningKey::from_bytes(&[42u8; 32].into()).unwrap();
    let hash = keccak256(b"legacy transaction signing payload");
    let (v, r, s) = sign(&hash, &key);

    let recovered = recover_address(&hash, v, &r, &s).unwrap();
    let expected = address_from_public_key(key.verifying_key());
    assert_eq!(recovered, expected);
}

#[test]
fn tampered_hash_recovers_a_different_address() {
    let key = SigningKey::from_bytes(&[99u8; 32].into()).unwrap();
    let hash = keccak256(b"original payload");
    let (v, r, s) = sign(&hash, &key);

    let tampered_hash = keccak256(b"tampered payload");
    let recovered = recover_address(&tampered_hash, v, &r, &s).unwrap();
    let signer = address_from_public_key(key.verifying_key());
    assert_ne!(recovered, signer);
}

#[test]
fn only_27_and_28_are_accepted_recovery_markers() {
    let hash = [3u8; 32];
    let r = [1u8; 32];
    let s = [1u8; 32];
    assert!(recover_address(&hash, 26, &r, &s).is_err());
    assert!(recover_address(&hash, 29, &r, &s).is_err());
}
