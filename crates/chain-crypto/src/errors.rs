use thiserror::Error;

/// Cryptographic failures (spec §7: "Signature recovery failure").
///
/// Every variant here is fatal for the block that triggered it; there is no
/// recoverable/non-recoverable split because the containing block is simply
/// aborted and the previous state root remains the last valid one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// `v` was not `27` or `28`. This engine only replays legacy,
    /// pre-EIP-155 transactions.
    #[error("invalid recovery id: {0} (expected 27 or 28)")]
    InvalidRecoveryId(u8),

    /// `r` or `s` was zero, or outside `[1, n-1]`.
    #[error("signature scalar out of range")]
    InvalidScalar,

    /// `r` is not a valid x-coordinate on the secp256k1 curve.
    #[error("signature r is not a valid curve point")]
    InvalidCurvePoint,

    /// Public key recovery itself failed (e.g. signature malformed).
    #[error("failed to recover public key from signature")]
    RecoveryFailed,
}
