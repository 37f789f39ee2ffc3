//! Parses the external genesis allocation file: `[(address, wei), …]`.

use chain_crypto::Address;
use primitive_types::U256;
use rlp_codec::{decode, Item};

use crate::error::ReplayError;

/// Decodes a genesis allocation file into `(address, wei)` pairs.
///
/// Addresses are RLP integers with leading zero bytes stripped by the
/// encoder; this left-pads each one back to 20 bytes. Wei amounts are
/// ordinary minimal big-endian RLP integers.
pub fn load_genesis_allocation(bytes: &[u8]) -> Result<Vec<(Address, U256)>, ReplayError> {
    let item = decode(bytes).map_err(ReplayError::Rlp)?;
    let entries = match item {
        Item::List(entries) => entries,
        Item::Bytes(_) => {
            return Err(ReplayError::InvalidGenesis(
                "allocation file is not a list".to_string(),
            ))
        }
    };

    entries.into_iter().map(decode_allocation_entry).collect()
}

fn decode_allocation_entry(entry: Item) -> Result<(Address, U256), ReplayError> {
    let fields = match entry {
        Item::List(fields) if fields.len() == 2 => fields,
        _ => {
            return Err(ReplayError::InvalidGenesis(
                "allocation entry is not a 2-element list".to_string(),
            ))
        }
    };

    let address_bytes = match &fields[0] {
        Item::Bytes(b) => b,
        Item::List(_) => {
            return Err(ReplayError::InvalidGenesis(
                "allocation address is not a byte string".to_string(),
            ))
        }
    };
    if address_bytes.len() > 20 {
        return Err(ReplayError::InvalidGenesis(format!(
            "allocation address has {} bytes, expected at most 20",
            address_bytes.len()
        )));
    }
    let mut address = [0u8; 20];
    address[20 - address_bytes.len()..].copy_from_slice(address_bytes);

    let wei_bytes = match &fields[1] {
        Item::Bytes(b) => b,
        Item::List(_) => {
            return Err(ReplayError::InvalidGenesis(
                "allocation value is not a byte string".to_string(),
            ))
        }
    };
    if wei_bytes.len() > 32 {
        return Err(ReplayError::InvalidGenesis(format!(
            "allocation value has {} bytes, expected at most 32",
            wei_bytes.len()
        )));
    }
    let value = U256::from_big_endian(wei_bytes);

    Ok((address, value))
}
