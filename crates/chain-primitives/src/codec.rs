//! Shared field-level encode/decode helpers used by [`crate::transaction`],
//! [`crate::header`], and [`crate::block`].

use primitive_types::U256;
use rlp_codec::{decode_u64, encode_u64, encode_uint_be, Item};

use crate::error::PrimitivesError;

pub fn encode_u256(value: U256) -> Item {
    let mut be = [0u8; 32];
    value.to_big_endian(&mut be);
    encode_uint_be(&be)
}

pub fn decode_u256(item: &Item) -> Result<U256, PrimitivesError> {
    let bytes = match item {
        Item::Bytes(b) => b,
        Item::List(_) => {
            return Err(PrimitivesError::WrongFieldLength {
                field: "uint",
                expected: 32,
                actual: 0,
            })
        }
    };
    if bytes.len() > 32 || matches!(bytes.first(), Some(0)) {
        return Err(PrimitivesError::WrongFieldLength {
            field: "uint",
            expected: 32,
            actual: bytes.len(),
        });
    }
    Ok(U256::from_big_endian(bytes))
}

/// Encodes any byte slice as an RLP byte string — used both for
/// fixed-width fields (hashes, addresses) and variable-length ones
/// (`data`, `extraData`, `logsBloom`).
pub fn encode_bytes(bytes: &[u8]) -> Item {
    Item::Bytes(bytes.to_vec())
}

pub fn decode_fixed_bytes<const N: usize>(
    item: &Item,
    field: &'static str,
) -> Result<[u8; N], PrimitivesError> {
    let bytes = match item {
        Item::Bytes(b) => b,
        Item::List(_) => {
            return Err(PrimitivesError::WrongFieldLength {
                field,
                expected: N,
                actual: 0,
            })
        }
    };
    if bytes.len() != N {
        return Err(PrimitivesError::WrongFieldLength {
            field,
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

pub fn decode_bytes(item: &Item, field: &'static str) -> Result<Vec<u8>, PrimitivesError> {
    match item {
        Item::Bytes(b) => Ok(b.clone()),
        Item::List(_) => Err(PrimitivesError::WrongFieldLength {
            field,
            expected: 0,
            actual: 0,
        }),
    }
}

pub fn encode_u64_field(value: u64) -> Item {
    encode_u64(value)
}

pub fn decode_u64_field(item: &Item) -> Result<u64, PrimitivesError> {
    decode_u64(item).map_err(PrimitivesError::Rlp)
}

pub fn field_list<'a>(
    item: &'a Item,
    expected: usize,
) -> Result<&'a [Item], PrimitivesError> {
    match item {
        Item::List(fields) if fields.len() == expected => Ok(fields),
        Item::List(fields) => Err(PrimitivesError::WrongFieldCount {
            expected,
            actual: fields.len(),
        }),
        Item::Bytes(_) => Err(PrimitivesError::WrongFieldCount {
            expected,
            actual: 0,
        }),
    }
}
