//! Blocks: a header, its transactions, and its uncles (ommers).

use rlp_codec::{decode, encode, Item};

use crate::codec::field_list;
use crate::error::PrimitivesError;
use crate::header::BlockHeader;
use crate::transaction::Transaction;

/// An uncle is simply another header — full headers are included, not
/// just their hashes.
pub type Uncle = BlockHeader;

/// A block: `(header, transactions, uncles)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
    pub uncles: Vec<Uncle>,
}

impl Block {
    /// RLP-encodes the block as a 3-element list.
    pub fn encode(&self) -> Vec<u8> {
        encode(&self.to_item())
    }

    fn to_item(&self) -> Item {
        Item::List(vec![
            self.header.to_item(),
            Item::List(self.transactions.iter().map(Transaction::to_item).collect()),
            Item::List(self.uncles.iter().map(Uncle::to_item).collect()),
        ])
    }

    /// Decodes a block from its RLP representation: `[header,
    /// transactions, uncles]`.
    pub fn decode(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let item = decode(bytes).map_err(PrimitivesError::Rlp)?;
        let fields = field_list(&item, 3)?;

        let header = BlockHeader::decode(&fields[0])?;

        let tx_items = match &fields[1] {
            Item::List(items) => items,
            Item::Bytes(_) => {
                return Err(PrimitivesError::WrongFieldCount {
                    expected: 0,
                    actual: 0,
                })
            }
        };
        let transactions = tx_items
            .iter()
            .map(Transaction::decode)
            .collect::<Result<Vec<_>, _>>()?;

        let uncle_items = match &fields[2] {
            Item::List(items) => items,
            Item::Bytes(_) => {
                return Err(PrimitivesError::WrongFieldCount {
                    expected: 0,
                    actual: 0,
                })
            }
        };
        let uncles = uncle_items
            .iter()
            .map(Uncle::decode)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            header,
            transactions,
            uncles,
        })
    }
}
