use rlp_codec::RlpError;
use thiserror::Error;

/// Errors decoding the wire structures in this crate.
#[derive(Debug, Error)]
pub enum PrimitivesError {
    /// Propagated from the underlying RLP codec.
    #[error("rlp error: {0}")]
    Rlp(#[source] RlpError),

    /// A field list had the wrong number of entries for its structure.
    #[error("wrong field count: expected {expected}, got {actual}")]
    WrongFieldCount { expected: usize, actual: usize },

    /// A fixed-width field (hash, address, bloom, PoW nonce) had the
    /// wrong byte length.
    #[error("field {field} has wrong length: expected {expected}, got {actual}")]
    WrongFieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The transaction's `to` field was empty, meaning contract creation.
    /// This engine does not execute contract deployment.
    #[error("contract-creation transactions are not supported")]
    ContractCreationUnsupported,

    /// `v` was not `27` or `28`.
    #[error("invalid signature v: {0} (expected 27 or 28)")]
    InvalidSignatureV(u8),

    /// Sender address recovery failed.
    #[error("signature recovery failed: {0}")]
    SignatureRecovery(#[source] chain_crypto::CryptoError),
}
