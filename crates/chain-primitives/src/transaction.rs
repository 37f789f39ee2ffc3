//! Legacy (pre-EIP-155) Ethereum transactions: 9 fields, no chain-id
//! replay protection.

use chain_crypto::Address;
use primitive_types::U256;
use rlp_codec::{encode, Item};

use crate::codec::{
    decode_bytes, decode_fixed_bytes, decode_u256, decode_u64_field, encode_bytes, encode_u256,
    encode_u64_field, field_list,
};
use crate::error::PrimitivesError;

/// A legacy transaction: `(nonce, gasPrice, gasLimit, to, value, data, v, r, s)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl Transaction {
    /// The 6-field pre-signature encoding `[nonce, gasPrice, gasLimit, to,
    /// value, data]` that the signer's hash is computed over.
    pub fn signing_item(&self) -> Item {
        Item::List(vec![
            encode_u64_field(self.nonce),
            encode_u256(self.gas_price),
            encode_u64_field(self.gas_limit),
            encode_bytes(&self.to),
            encode_u256(self.value),
            encode_bytes(&self.data),
        ])
    }

    /// RLP bytes of [`Self::signing_item`], the preimage of the signature.
    pub fn signing_rlp(&self) -> Vec<u8> {
        encode(&self.signing_item())
    }

    /// Recovers the sender's address from this transaction's signature
    /// over `keccak256(signing_rlp())`.
    pub fn sender(&self) -> Result<Address, PrimitivesError> {
        let hash = chain_crypto::keccak256(&self.signing_rlp());
        chain_crypto::recover_address(&hash, self.v, &self.r, &self.s)
            .map_err(PrimitivesError::SignatureRecovery)
    }

    /// RLP-encodes the full 9-field transaction.
    pub(crate) fn to_item(&self) -> Item {
        Item::List(vec![
            encode_u64_field(self.nonce),
            encode_u256(self.gas_price),
            encode_u64_field(self.gas_limit),
            encode_bytes(&self.to),
            encode_u256(self.value),
            encode_bytes(&self.data),
            encode_u64_field(self.v as u64),
            encode_bytes(&self.r),
            encode_bytes(&self.s),
        ])
    }

    pub fn encode(&self) -> Vec<u8> {
        encode(&self.to_item())
    }

    /// Decodes a transaction from its RLP encoding.
    pub fn decode(item: &Item) -> Result<Self, PrimitivesError> {
        let fields = field_list(item, 9)?;

        let to_bytes = decode_bytes(&fields[3], "to")?;
        if to_bytes.is_empty() {
            return Err(PrimitivesError::ContractCreationUnsupported);
        }
        let mut to = [0u8; 20];
        if to_bytes.len() != 20 {
            return Err(PrimitivesError::WrongFieldLength {
                field: "to",
                expected: 20,
                actual: to_bytes.len(),
            });
        }
        to.copy_from_slice(&to_bytes);

        let v = decode_u64_field(&fields[6])?;
        if v != 27 && v != 28 {
            return Err(PrimitivesError::InvalidSignatureV(v as u8));
        }

        Ok(Self {
            nonce: decode_u64_field(&fields[0])?,
            gas_price: decode_u256(&fields[1])?,
            gas_limit: decode_u64_field(&fields[2])?,
            to,
            value: decode_u256(&fields[4])?,
            data: decode_bytes(&fields[5], "data")?,
            v: v as u8,
            r: decode_fixed_bytes(&fields[7], "r")?,
            s: decode_fixed_bytes(&fields[8], "s")?,
        })
    }

    /// Pre-Istanbul (block < 9,069,000) intrinsic gas: 21000 plus 4 per
    /// zero data byte and 68 per nonzero data byte.
    pub fn intrinsic_gas(&self, istanbul: bool) -> u64 {
        let nonzero_cost = if istanbul { 16 } else { 68 };
        let mut gas = 21_000u64;
        for &byte in &self.data {
            gas += if byte == 0 { 4 } else { nonzero_cost };
        }
        gas
    }
}
