use thiserror::Error;

/// Decoding faults for the RLP grammar (spec §7: "Decoding fault").
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RlpError {
    /// The input ended before a declared length could be satisfied.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof {
        /// Byte offset at which more input was expected.
        offset: usize,
    },

    /// A long-form length prefix was not minimal: either it carried a
    /// leading zero byte, or it encoded a length that fits in the short
    /// form (<= 55 bytes). The state root depends on canonical encoding,
    /// so non-canonical lengths are rejected rather than normalized.
    #[error("non-canonical length encoding at offset {offset}")]
    NonCanonicalLength {
        /// Byte offset of the offending length prefix.
        offset: usize,
    },

    /// `decode` requires the input to be fully consumed by a single item.
    #[error("{extra} trailing byte(s) after a complete RLP item")]
    TrailingBytes {
        /// Number of bytes left over after decoding the outermost item.
        extra: usize,
    },

    /// A byte string expected to be a minimal big-endian integer carried
    /// a leading zero byte.
    #[error("non-minimal integer encoding at offset {offset}")]
    NonMinimalInteger {
        /// Byte offset of the offending byte string.
        offset: usize,
    },

    /// An integer byte string was wider than the target type can hold.
    #[error("integer of {len} bytes overflows the target width")]
    IntegerTooWide {
        /// Length in bytes of the oversized integer.
        len: usize,
    },

    /// Expected a byte string (`Item::Bytes`) but found a list, or vice versa.
    #[error("unexpected RLP item shape")]
    UnexpectedShape,

    /// Expected a list of a specific arity but found a different length.
    #[error("expected a list of {expected} item(s), found {actual}")]
    WrongArity {
        /// Expected number of list elements.
        expected: usize,
        /// Actual number of list elements.
        actual: usize,
    },
}
