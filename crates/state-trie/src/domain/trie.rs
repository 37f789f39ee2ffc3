//! The persistent Merkle Patricia Trie itself: `get`/`set`/`root`/`items`.
//!
//! `set` never mutates a node in place — it builds the new nodes the
//! insertion touches, commits each one (inlining or hashing into the
//! store per §4.D's rule), and returns a `Trie` wrapping the new root.
//! Every subtree the insertion didn't touch is shared by reference with
//! the trie that was passed in.

use std::sync::Arc;

use chain_crypto::{keccak256, Hash};
use rlp_codec::{bytes_to_nibbles, common_prefix, nibbles_to_bytes, Nibbles};

use crate::domain::entities::empty_tree_root;
use crate::domain::errors::TrieError;
use crate::domain::node::{decode_node, encode_node, Ref, TrieNode};
use crate::domain::store::NodeStore;

/// A persistent Merkle Patricia Trie over an append-only node store.
#[derive(Clone)]
pub struct Trie<S: NodeStore> {
    store: Arc<S>,
    root: Ref,
}

impl<S: NodeStore> Trie<S> {
    /// An empty trie backed by `store`.
    pub fn empty(store: Arc<S>) -> Self {
        Self {
            store,
            root: Ref::Empty,
        }
    }

    /// Reopens a trie at a previously-committed root hash.
    pub fn at_root(store: Arc<S>, root: Hash) -> Self {
        Self {
            store,
            root: Ref::Hash(root),
        }
    }

    /// The trie's commitment. Always a 32-byte hash for a non-empty trie,
    /// even when the root node's own encoding would have been inlined —
    /// inlining applies only to children, never to the externally visible
    /// root (spec §4.E).
    pub fn root(&self) -> Hash {
        match &self.root {
            Ref::Empty => empty_tree_root(),
            Ref::Hash(h) => *h,
            Ref::Inline(node) => {
                let enc = encode_node(node);
                let hash = keccak256(&enc);
                self.store.put(hash, enc);
                hash
            }
        }
    }

    /// Returns the value stored at `key`, or `None` if absent.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TrieError> {
        let path = bytes_to_nibbles(key);
        self.get_at(&self.root, &path)
    }

    fn get_at(&self, r: &Ref, path: &[u8]) -> Result<Option<Vec<u8>>, TrieError> {
        let node = match self.deref(r)? {
            Some(node) => node,
            None => return Ok(None),
        };

        match node {
            TrieNode::Leaf { path: p, value } => {
                if p == path {
                    Ok(Some(value))
                } else {
                    Ok(None)
                }
            }
            TrieNode::Extension { path: p, child } => {
                if path.len() >= p.len() && path[..p.len()] == p[..] {
                    self.get_at(&child, &path[p.len()..])
                } else {
                    Ok(None)
                }
            }
            TrieNode::Branch { slots, value } => {
                if path.is_empty() {
                    Ok(value)
                } else {
                    self.get_at(&slots[path[0] as usize], &path[1..])
                }
            }
        }
    }

    /// Returns a new trie with `key` mapped to `value`, sharing every
    /// subtree the insertion didn't touch.
    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<Self, TrieError> {
        let path = bytes_to_nibbles(key);
        let new_root = self.insert(&self.root, &path, value)?;
        Ok(Self {
            store: self.store.clone(),
            root: new_root,
        })
    }

    /// All key/value pairs in the trie, for iteration and testing.
    pub fn items(&self) -> Result<Vec<(Vec<u8>, Vec<u8>)>, TrieError> {
        let mut out = Vec::new();
        self.collect(&self.root, &mut Vec::new(), &mut out)?;
        Ok(out)
    }

    /// Number of key/value pairs in the trie.
    pub fn len(&self) -> Result<usize, TrieError> {
        Ok(self.items()?.len())
    }

    /// Whether the trie holds no key/value pairs.
    pub fn is_empty(&self) -> Result<bool, TrieError> {
        Ok(self.len()? == 0)
    }

    fn collect(
        &self,
        r: &Ref,
        prefix: &mut Nibbles,
        out: &mut Vec<(Vec<u8>, Vec<u8>)>,
    ) -> Result<(), TrieError> {
        let node = match self.deref(r)? {
            Some(node) => node,
            None => return Ok(()),
        };

        match node {
            TrieNode::Leaf { path, value } => {
                prefix.extend_from_slice(&path);
                out.push((nibbles_to_bytes(prefix), value));
                prefix.truncate(prefix.len() - path.len());
            }
            TrieNode::Extension { path, child } => {
                prefix.extend_from_slice(&path);
                self.collect(&child, prefix, out)?;
                prefix.truncate(prefix.len() - path.len());
            }
            TrieNode::Branch { slots, value } => {
                if let Some(value) = value {
                    out.push((nibbles_to_bytes(prefix), value));
                }
                for (nibble, slot) in slots.iter().enumerate() {
                    prefix.push(nibble as u8);
                    self.collect(slot, prefix, out)?;
                    prefix.pop();
                }
            }
        }
        Ok(())
    }

    /// Loads the node a reference points to, or `None` for `Ref::Empty`.
    fn deref(&self, r: &Ref) -> Result<Option<TrieNode>, TrieError> {
        match r {
            Ref::Empty => Ok(None),
            Ref::Inline(node) => Ok(Some((**node).clone())),
            Ref::Hash(hash) => {
                let bytes = self.store.get(hash)?;
                Ok(Some(decode_node(&bytes)?))
            }
        }
    }

    /// Commits a freshly-built node: inlines it if its RLP encoding is
    /// under 32 bytes, otherwise hashes it and stores the encoding.
    fn commit(&self, node: TrieNode) -> Ref {
        let enc = encode_node(&node);
        if enc.len() < 32 {
            Ref::Inline(Box::new(node))
        } else {
            let hash = keccak256(&enc);
            self.store.put(hash, enc);
            Ref::Hash(hash)
        }
    }

    /// `insert(node, path, value) -> new_reference`, per the recursive
    /// algorithm of spec §4.E. `path` is always relative to `node` — the
    /// portion of the key not yet consumed by an ancestor.
    fn insert(&self, r: &Ref, path: &[u8], value: &[u8]) -> Result<Ref, TrieError> {
        let node = match self.deref(r)? {
            None => {
                return Ok(self.commit(TrieNode::Leaf {
                    path: path.to_vec(),
                    value: value.to_vec(),
                }));
            }
            Some(node) => node,
        };

        match node {
            TrieNode::Leaf { path: p, value: v } => {
                if p == path {
                    return Ok(self.commit(TrieNode::Leaf {
                        path: p,
                        value: value.to_vec(),
                    }));
                }

                let (common, p_tail, path_tail) = common_prefix(&p, path);
                let branch = self.merge_into_branch(p_tail, v, path_tail, value.to_vec());
                Ok(self.wrap_with_extension(common, branch))
            }

            TrieNode::Extension { path: p, child } => {
                let (common, p_tail, path_tail) = common_prefix(&p, path);

                if p_tail.is_empty() {
                    // The extension's whole path is consumed; recurse into its child.
                    let new_child = self.insert(&child, path_tail, value)?;
                    return Ok(self.wrap_with_extension(&p, new_child));
                }

                // Split the extension at the point of divergence.
                let old_nibble = p_tail[0];
                let remainder = &p_tail[1..];
                let remainder_ref = if remainder.is_empty() {
                    child
                } else {
                    self.commit(TrieNode::Extension {
                        path: remainder.to_vec(),
                        child,
                    })
                };

                let branch = if path_tail.is_empty() {
                    self.build_branch(old_nibble, remainder_ref, None, Some(value.to_vec()))
                } else {
                    let new_leaf = self.commit(TrieNode::Leaf {
                        path: path_tail[1..].to_vec(),
                        value: value.to_vec(),
                    });
                    self.build_branch(
                        old_nibble,
                        remainder_ref,
                        Some((path_tail[0], new_leaf)),
                        None,
                    )
                };

                Ok(self.wrap_with_extension(common, branch))
            }

            TrieNode::Branch {
                mut slots,
                value: branch_value,
            } => {
                if path.is_empty() {
                    return Ok(self.commit(TrieNode::Branch {
                        slots,
                        value: Some(value.to_vec()),
                    }));
                }
                let nibble = path[0] as usize;
                let new_child = self.insert(&slots[nibble], &path[1..], value)?;
                slots[nibble] = new_child;
                Ok(self.commit(TrieNode::Branch {
                    slots,
                    value: branch_value,
                }))
            }
        }
    }

    /// Builds a 2-entry branch holding `old` at its diverging nibble (or
    /// in the value slot if its tail is empty) and `new` likewise, used
    /// when a Leaf splits against a diverging key.
    fn merge_into_branch(
        &self,
        old_tail: &[u8],
        old_value: Vec<u8>,
        new_tail: &[u8],
        new_value: Vec<u8>,
    ) -> Ref {
        let mut slots: [Ref; 16] = std::array::from_fn(|_| Ref::Empty);
        let mut branch_value = None;

        if old_tail.is_empty() {
            branch_value = Some(old_value);
        } else {
            slots[old_tail[0] as usize] = self.commit(TrieNode::Leaf {
                path: old_tail[1..].to_vec(),
                value: old_value,
            });
        }

        if new_tail.is_empty() {
            branch_value = Some(new_value);
        } else {
            slots[new_tail[0] as usize] = self.commit(TrieNode::Leaf {
                path: new_tail[1..].to_vec(),
                value: new_value,
            });
        }

        self.commit(TrieNode::Branch {
            slots: Box::new(slots),
            value: branch_value,
        })
    }

    /// Builds a branch with one existing `(nibble, ref)` slot and one new
    /// `(nibble, ref)` slot or value, used when an Extension splits.
    fn build_branch(
        &self,
        old_nibble: u8,
        old_ref: Ref,
        new_entry: Option<(u8, Ref)>,
        new_value: Option<Vec<u8>>,
    ) -> Ref {
        let mut slots: [Ref; 16] = std::array::from_fn(|_| Ref::Empty);
        slots[old_nibble as usize] = old_ref;
        if let Some((n, r)) = new_entry {
            slots[n as usize] = r;
        }
        self.commit(TrieNode::Branch {
            slots: Box::new(slots),
            value: new_value,
        })
    }

    /// Wraps `child` in an `Extension(path, child)` unless `path` is
    /// empty, in which case `child` is returned unchanged.
    fn wrap_with_extension(&self, path: &[u8], child: Ref) -> Ref {
        if path.is_empty() {
            child
        } else {
            self.commit(TrieNode::Extension {
                path: path.to_vec(),
                child,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_db::InMemoryNodeStore;

    fn new_trie() -> Trie<InMemoryNodeStore> {
        Trie::empty(Arc::new(InMemoryNodeStore::new()))
    }

    #[test]
    fn empty_trie_root_is_keccak_of_empty_rlp_string() {
        let trie = new_trie();
        assert_eq!(trie.root(), empty_tree_root());
    }

    #[test]
    fn single_insertion_then_lookup() {
        let trie = new_trie();
        let trie = trie.set(b"dog", b"puppy").unwrap();
        assert_eq!(trie.get(b"dog").unwrap(), Some(b"puppy".to_vec()));
        assert_eq!(trie.get(b"cat").unwrap(), None);
    }

    #[test]
    fn overwrite_existing_key() {
        let trie = new_trie();
        let trie = trie.set(b"dog", b"puppy").unwrap();
        let trie = trie.set(b"dog", b"hound").unwrap();
        assert_eq!(trie.get(b"dog").unwrap(), Some(b"hound".to_vec()));
        assert_eq!(trie.len().unwrap(), 1);
    }

    #[test]
    fn diverging_keys_produce_branch() {
        let trie = new_trie();
        let trie = trie.set(b"dog", b"puppy").unwrap();
        let trie = trie.set(b"doe", b"deer").unwrap();
        assert_eq!(trie.get(b"dog").unwrap(), Some(b"puppy".to_vec()));
        assert_eq!(trie.get(b"doe").unwrap(), Some(b"deer".to_vec()));
        assert_eq!(trie.len().unwrap(), 2);
    }

    #[test]
    fn prefix_key_uses_branch_value_slot() {
        let trie = new_trie();
        let trie = trie.set(b"do", b"verb").unwrap();
        let trie = trie.set(b"dog", b"puppy").unwrap();
        assert_eq!(trie.get(b"do").unwrap(), Some(b"verb".to_vec()));
        assert_eq!(trie.get(b"dog").unwrap(), Some(b"puppy".to_vec()));
        assert_eq!(trie.len().unwrap(), 2);
    }

    #[test]
    fn shorter_key_inserted_after_longer_sibling() {
        // Exercises the path_tail-empty / p_tail-nonempty edge case: `do`
        // arrives after `dog` already occupies the leaf.
        let trie = new_trie();
        let trie = trie.set(b"dog", b"puppy").unwrap();
        let trie = trie.set(b"do", b"verb").unwrap();
        assert_eq!(trie.get(b"do").unwrap(), Some(b"verb".to_vec()));
        assert_eq!(trie.get(b"dog").unwrap(), Some(b"puppy".to_vec()));
        assert_eq!(trie.len().unwrap(), 2);
    }

    #[test]
    fn shared_extension_collapses_on_divergence() {
        let trie = new_trie();
        let trie = trie.set(b"dog", b"puppy").unwrap();
        let trie = trie.set(b"cat", b"kitten").unwrap();
        let trie = trie.set(b"cow", b"calf").unwrap();
        assert_eq!(trie.get(b"dog").unwrap(), Some(b"puppy".to_vec()));
        assert_eq!(trie.get(b"cat").unwrap(), Some(b"kitten".to_vec()));
        assert_eq!(trie.get(b"cow").unwrap(), Some(b"calf".to_vec()));
        assert_eq!(trie.len().unwrap(), 3);
    }

    #[test]
    fn set_shares_unrelated_subtrees() {
        let base = new_trie()
            .set(b"dog", b"puppy")
            .unwrap()
            .set(b"cat", b"kitten")
            .unwrap();
        let updated = base.set(b"cow", b"calf").unwrap();
        assert_eq!(base.len().unwrap(), 2);
        assert_eq!(updated.len().unwrap(), 3);
        assert_eq!(base.get(b"cow").unwrap(), None);
        assert_eq!(updated.get(b"dog").unwrap(), Some(b"puppy".to_vec()));
    }

    #[test]
    fn items_returns_all_pairs() {
        let trie = new_trie()
            .set(b"dog", b"puppy")
            .unwrap()
            .set(b"cat", b"kitten")
            .unwrap()
            .set(b"do", b"verb")
            .unwrap();
        let mut items = trie.items().unwrap();
        items.sort();
        let mut expected = vec![
            (b"dog".to_vec(), b"puppy".to_vec()),
            (b"cat".to_vec(), b"kitten".to_vec()),
            (b"do".to_vec(), b"verb".to_vec()),
        ];
        expected.sort();
        assert_eq!(items, expected);
    }

    #[test]
    fn reopening_by_root_hash_sees_same_data() {
        let store = Arc::new(InMemoryNodeStore::new());
        let trie = Trie::empty(store.clone())
            .set(b"dog", b"puppy")
            .unwrap()
            .set(b"cat", b"kitten")
            .unwrap();
        let root = trie.root();

        let reopened = Trie::at_root(store, root);
        assert_eq!(reopened.get(b"dog").unwrap(), Some(b"puppy".to_vec()));
        assert_eq!(reopened.get(b"cat").unwrap(), Some(b"kitten".to_vec()));
    }

    #[test]
    fn many_addresses_roundtrip() {
        let mut trie = new_trie();
        let mut expected = Vec::new();
        for i in 0u8..64 {
            let mut key = [0u8; 20];
            key[19] = i;
            key[0] = i.wrapping_mul(37);
            let value = vec![i, i.wrapping_add(1)];
            trie = trie.set(&key, &value).unwrap();
            expected.push((key.to_vec(), value));
        }
        for (key, value) in &expected {
            assert_eq!(trie.get(key).unwrap().as_ref(), Some(value));
        }
        assert_eq!(trie.len().unwrap(), expected.len());
    }
}
