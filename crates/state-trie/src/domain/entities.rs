//! Account record: the value stored at each leaf of the state trie.

use chain_crypto::{keccak256, Hash};
use primitive_types::U256;
use rlp_codec::{decode, encode, encode_uint_be, Item};

use crate::domain::errors::TrieError;

/// `keccak256("")`, the default account's `code_hash`.
pub fn empty_string_hash() -> Hash {
    chain_crypto::empty_string_hash()
}

/// `keccak256(rlp(""))`, both the empty trie's root and the default
/// account's `storage_root`.
pub fn empty_tree_root() -> Hash {
    keccak256(&encode(&Item::Bytes(Vec::new())))
}

/// An account record: `(nonce, balance, storage_root, code_hash)`.
///
/// For an address with no entry in the trie, the implicit value is
/// [`Account::default`] — nonce and balance zero, `storage_root` is the
/// empty trie's root, `code_hash` is the hash of the empty byte string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub nonce: u64,
    pub balance: U256,
    pub storage_root: Hash,
    pub code_hash: Hash,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::zero(),
            storage_root: empty_tree_root(),
            code_hash: empty_string_hash(),
        }
    }
}

impl Account {
    /// RLP-encodes this account as `[nonce, balance, storage_root, code_hash]`.
    pub fn encode(&self) -> Vec<u8> {
        let mut balance_be = [0u8; 32];
        self.balance.to_big_endian(&mut balance_be);

        encode(&Item::List(vec![
            encode_uint_be(&self.nonce.to_be_bytes()),
            encode_uint_be(&balance_be),
            Item::Bytes(self.storage_root.to_vec()),
            Item::Bytes(self.code_hash.to_vec()),
        ]))
    }

    /// Decodes an account from its RLP encoding.
    pub fn decode(bytes: &[u8]) -> Result<Self, TrieError> {
        let item = decode(bytes).map_err(TrieError::Rlp)?;
        let fields = match item {
            Item::List(fields) if fields.len() == 4 => fields,
            _ => return Err(TrieError::MalformedAccount),
        };

        let nonce = rlp_codec::decode_u64(&fields[0]).map_err(TrieError::Rlp)?;
        let balance = uint_item(&fields[1])?;
        let storage_root = hash_item(&fields[2])?;
        let code_hash = hash_item(&fields[3])?;

        Ok(Self {
            nonce,
            balance,
            storage_root,
            code_hash,
        })
    }

    /// Debits `amount` wei, failing if the balance would go negative.
    pub fn debit(&mut self, amount: U256) -> Result<(), TrieError> {
        if self.balance < amount {
            return Err(TrieError::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Credits `amount` wei.
    pub fn credit(&mut self, amount: U256) {
        self.balance += amount;
    }
}

fn uint_item(item: &Item) -> Result<U256, TrieError> {
    match item {
        Item::Bytes(b) if b.len() <= 32 && !matches!(b.first(), Some(0)) => {
            Ok(U256::from_big_endian(b))
        }
        Item::Bytes(_) => Err(TrieError::MalformedAccount),
        Item::List(_) => Err(TrieError::MalformedAccount),
    }
}

fn hash_item(item: &Item) -> Result<Hash, TrieError> {
    match item {
        Item::Bytes(b) if b.len() == 32 => {
            let mut h = [0u8; 32];
            h.copy_from_slice(b);
            Ok(h)
        }
        _ => Err(TrieError::MalformedAccount),
    }
}
