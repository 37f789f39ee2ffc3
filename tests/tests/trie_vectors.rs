//! Nibble, hex-prefix, and trie vectors from the published
//! `trietest.json`-style fixtures.

use std::sync::Arc;

use rlp_codec::{bytes_to_nibbles, get_flag, hp_to_nibbles, nibbles_to_bytes, nibbles_to_hp};
use state_trie::{InMemoryNodeStore, Trie};

#[test]
fn nibble_round_trip() {
    let bytes = b"\x12\x34\x56";
    let nibbles = bytes_to_nibbles(bytes);
    assert_eq!(nibbles, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(nibbles_to_bytes(&nibbles), bytes);
}

#[test]
fn hex_prefix_even_length_extension() {
    let nibbles = vec![0x01, 0x02, 0x03, 0x04];
    let hp = nibbles_to_hp(&nibbles, false);
    assert_eq!(hp, vec![0x00, 0x12, 0x34]);
    assert_eq!(hp_to_nibbles(&hp), nibbles);
    assert!(!get_flag(&hp));
}

#[test]
fn hex_prefix_even_length_leaf() {
    let nibbles = vec![0x01, 0x02, 0x03, 0x04];
    let hp = nibbles_to_hp(&nibbles, true);
    assert_eq!(hp, vec![0x20, 0x12, 0x34]);
    assert_eq!(hp_to_nibbles(&hp), nibbles);
    assert!(get_flag(&hp));
}

#[test]
fn hex_prefix_odd_length_leaf() {
    let nibbles = vec![0x01, 0x02, 0x03];
    let hp = nibbles_to_hp(&nibbles, true);
    assert_eq!(hp, vec![0x31, 0x23]);
    assert_eq!(hp_to_nibbles(&hp), nibbles);
    assert!(get_flag(&hp));
}

#[test]
fn empty_trie_root_is_canonical_empty_tree_hash() {
    let trie = Trie::empty(Arc::new(InMemoryNodeStore::default()));
    let root = trie.root();
    let expected =
        hex::decode("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421").unwrap();
    assert_eq!(root.to_vec(), expected);
    assert_eq!(root, state_trie::empty_tree_root());
}

#[test]
fn shorter_key_is_retrievable_after_prefix_key_inserted() {
    let trie = Trie::empty(Arc::new(InMemoryNodeStore::default()));
    let trie = trie.set(b"\x12\x34", b"xyz").unwrap();
    let trie = trie.set(b"\x12\x34\x56\x78", b"ijk").unwrap();

    assert_eq!(trie.get(b"\x12\x34").unwrap(), Some(b"xyz".to_vec()));
    assert_eq!(
        trie.get(b"\x12\x34\x56\x78").unwrap(),
        Some(b"ijk".to_vec())
    );
    assert_eq!(trie.get(b"\x12").unwrap(), None);
}

#[test]
fn insertion_order_does_not_change_the_root() {
    let pairs: Vec<(&[u8], &[u8])> = vec![
        (b"do", b"verb"),
        (b"dog", b"puppy"),
        (b"doge", b"coin"),
        (b"horse", b"stallion"),
    ];

    let forward = {
        let mut trie = Trie::empty(Arc::new(InMemoryNodeStore::default()));
        for (k, v) in &pairs {
            trie = trie.set(k, v).unwrap();
        }
        trie.root()
    };

    let reversed = {
        let mut trie = Trie::empty(Arc::new(InMemoryNodeStore::default()));
        for (k, v) in pairs.iter().rev() {
            trie = trie.set(k, v).unwrap();
        }
        trie.root()
    };

    assert_eq!(forward, reversed);
}

#[test]
fn persistence_keeps_earlier_values_reachable_from_their_own_root() {
    let t0 = Trie::empty(Arc::new(InMemoryNodeStore::default()));
    let t1 = t0.set(b"key", b"v1").unwrap();
    let t2 = t1.set(b"key", b"v2").unwrap();

    assert_eq!(t0.get(b"key").unwrap(), None);
    assert_eq!(t1.get(b"key").unwrap(), Some(b"v1".to_vec()));
    assert_eq!(t2.get(b"key").unwrap(), Some(b"v2".to_vec()));
}
