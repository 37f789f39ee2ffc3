//! Block headers: the 15-field structure whose hash chains blocks
//! together and whose `stateRoot` the replay engine must reproduce.

use chain_crypto::{keccak256, Address, Hash};
use primitive_types::U256;
use rlp_codec::{encode, Item};

use crate::codec::{
    decode_bytes, decode_fixed_bytes, decode_u256, decode_u64_field, encode_bytes, encode_u256,
    encode_u64_field, field_list,
};
use crate::error::PrimitivesError;

/// A block header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub parent_hash: Hash,
    pub ommers_hash: Hash,
    pub beneficiary: Address,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub logs_bloom: Vec<u8>,
    pub difficulty: U256,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Vec<u8>,
    pub mix_hash: Hash,
    pub nonce: [u8; 8],
}

impl BlockHeader {
    pub(crate) fn to_item(&self) -> Item {
        Item::List(vec![
            encode_bytes(&self.parent_hash),
            encode_bytes(&self.ommers_hash),
            encode_bytes(&self.beneficiary),
            encode_bytes(&self.state_root),
            encode_bytes(&self.transactions_root),
            encode_bytes(&self.receipts_root),
            encode_bytes(&self.logs_bloom),
            encode_u256(self.difficulty),
            encode_u64_field(self.number),
            encode_u64_field(self.gas_limit),
            encode_u64_field(self.gas_used),
            encode_u64_field(self.timestamp),
            encode_bytes(&self.extra_data),
            encode_bytes(&self.mix_hash),
            encode_bytes(&self.nonce),
        ])
    }

    /// RLP-encodes the full 15-field header.
    pub fn encode(&self) -> Vec<u8> {
        encode(&self.to_item())
    }

    /// Decodes a header from its RLP representation.
    pub fn decode(item: &Item) -> Result<Self, PrimitivesError> {
        let fields = field_list(item, 15)?;
        Ok(Self {
            parent_hash: decode_fixed_bytes(&fields[0], "parentHash")?,
            ommers_hash: decode_fixed_bytes(&fields[1], "ommersHash")?,
            beneficiary: decode_fixed_bytes(&fields[2], "beneficiary")?,
            state_root: decode_fixed_bytes(&fields[3], "stateRoot")?,
            transactions_root: decode_fixed_bytes(&fields[4], "transactionsRoot")?,
            receipts_root: decode_fixed_bytes(&fields[5], "receiptsRoot")?,
            logs_bloom: decode_bytes(&fields[6], "logsBloom")?,
            difficulty: decode_u256(&fields[7])?,
            number: decode_u64_field(&fields[8])?,
            gas_limit: decode_u64_field(&fields[9])?,
            gas_used: decode_u64_field(&fields[10])?,
            timestamp: decode_u64_field(&fields[11])?,
            extra_data: decode_bytes(&fields[12], "extraData")?,
            mix_hash: decode_fixed_bytes(&fields[13], "mixHash")?,
            nonce: decode_fixed_bytes(&fields[14], "nonce")?,
        })
    }

    /// `keccak256(rlp(header))`, the value every child block's
    /// `parentHash` and every uncle-list's `ommersHash` must match.
    pub fn hash(&self) -> Hash {
        keccak256(&encode(&self.to_item()))
    }
}
