//! Trie node shapes and their RLP structure.
//!
//! This module only knows how to turn a [`TrieNode`] into the `Item` tree
//! that represents it and back; it has no notion of a node *store* — that
//! lives in [`crate::domain::trie`], which is the only place that decides
//! whether a child is inlined or hashed.

use chain_crypto::Hash;
use rlp_codec::{decode, encode, hp_to_nibbles, nibbles_to_hp, Item, Nibbles};

use crate::domain::errors::TrieError;

/// A reference to a child node: absent, inlined, or hashed into the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ref {
    /// No child at this slot — the zero-length byte string.
    Empty,
    /// The child's RLP encoding was 32 bytes or longer; `Hash` is the
    /// Keccak-256 digest under which it was stored.
    Hash(Hash),
    /// The child's RLP encoding was under 32 bytes, so it is embedded
    /// directly in the parent rather than stored and hashed.
    Inline(Box<TrieNode>),
}

/// One of the three Merkle Patricia Trie node shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrieNode {
    /// 16 child references indexed by nibble, plus an optional value.
    Branch {
        slots: Box<[Ref; 16]>,
        value: Option<Vec<u8>>,
    },
    /// A shared nibble path to a single child, itself a branch.
    Extension { path: Nibbles, child: Ref },
    /// A nibble path terminating in a value.
    Leaf { path: Nibbles, value: Vec<u8> },
}

/// Converts a node to the `Item` tree representing its own RLP structure
/// (what `rlp(node)` means in the spec).
pub fn node_to_item(node: &TrieNode) -> Item {
    match node {
        TrieNode::Leaf { path, value } => Item::List(vec![
            Item::Bytes(nibbles_to_hp(path, true)),
            Item::Bytes(value.clone()),
        ]),
        TrieNode::Extension { path, child } => Item::List(vec![
            Item::Bytes(nibbles_to_hp(path, false)),
            ref_to_item(child),
        ]),
        TrieNode::Branch { slots, value } => {
            let mut items: Vec<Item> = slots.iter().map(ref_to_item).collect();
            items.push(Item::Bytes(value.clone().unwrap_or_default()));
            Item::List(items)
        }
    }
}

/// Encodes a node to its raw RLP bytes.
pub fn encode_node(node: &TrieNode) -> Vec<u8> {
    encode(&node_to_item(node))
}

/// Converts a child reference to the `Item` embedded in its parent's list:
/// the empty string, a 32-byte hash, or (for an inlined child) the child's
/// own node structure nested directly.
pub fn ref_to_item(r: &Ref) -> Item {
    match r {
        Ref::Empty => Item::Bytes(Vec::new()),
        Ref::Hash(h) => Item::Bytes(h.to_vec()),
        Ref::Inline(node) => node_to_item(node),
    }
}

/// Decodes a child reference out of the `Item` found in a parent's list.
pub fn item_to_ref(item: &Item) -> Result<Ref, TrieError> {
    match item {
        Item::Bytes(b) if b.is_empty() => Ok(Ref::Empty),
        Item::Bytes(b) if b.len() == 32 => {
            let mut h = [0u8; 32];
            h.copy_from_slice(b);
            Ok(Ref::Hash(h))
        }
        Item::Bytes(_) => Err(TrieError::MalformedNode),
        Item::List(_) => Ok(Ref::Inline(Box::new(item_to_node(item)?))),
    }
}

/// Decodes a node out of its `Item` representation (a 2-element list for
/// leaf/extension, or a 17-element list for a branch).
pub fn item_to_node(item: &Item) -> Result<TrieNode, TrieError> {
    let fields = match item {
        Item::List(fields) => fields,
        Item::Bytes(_) => return Err(TrieError::MalformedNode),
    };

    match fields.len() {
        2 => {
            let hp = match &fields[0] {
                Item::Bytes(b) if !b.is_empty() => b.clone(),
                _ => return Err(TrieError::MalformedNode),
            };
            let path = hp_to_nibbles(&hp);
            let is_leaf = rlp_codec::get_flag(&hp);
            if is_leaf {
                let value = match &fields[1] {
                    Item::Bytes(b) => b.clone(),
                    Item::List(_) => return Err(TrieError::MalformedNode),
                };
                Ok(TrieNode::Leaf { path, value })
            } else {
                let child = item_to_ref(&fields[1])?;
                Ok(TrieNode::Extension { path, child })
            }
        }
        17 => {
            let mut slots: [Ref; 16] = std::array::from_fn(|_| Ref::Empty);
            for (i, slot) in slots.iter_mut().enumerate() {
                *slot = item_to_ref(&fields[i])?;
            }
            let value = match &fields[16] {
                Item::Bytes(b) if b.is_empty() => None,
                Item::Bytes(b) => Some(b.clone()),
                Item::List(_) => return Err(TrieError::MalformedNode),
            };
            Ok(TrieNode::Branch {
                slots: Box::new(slots),
                value,
            })
        }
        _ => Err(TrieError::MalformedNode),
    }
}

/// Decodes a node from its raw RLP bytes.
pub fn decode_node(bytes: &[u8]) -> Result<TrieNode, TrieError> {
    let item = decode(bytes).map_err(TrieError::Rlp)?;
    item_to_node(&item)
}
