//! The canonical RLP vectors this engine's state roots depend on.

use rlp_codec::{decode, encode, Item};

#[test]
fn empty_string_encodes_to_0x80() {
    let item = Item::Bytes(Vec::new());
    assert_eq!(encode(&item), vec![0x80]);
}

#[test]
fn short_string_dog() {
    let item = Item::Bytes(b"dog".to_vec());
    assert_eq!(encode(&item), vec![0x83, b'd', b'o', b'g']);
}

#[test]
fn list_of_two_short_strings() {
    let item = Item::List(vec![
        Item::Bytes(b"cat".to_vec()),
        Item::Bytes(b"dog".to_vec()),
    ]);
    let encoded = encode(&item);
    assert_eq!(
        encoded,
        vec![0xC8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
    );
    assert_eq!(decode(&encoded).unwrap(), item);
}

#[test]
fn single_byte_below_0x80_is_its_own_encoding() {
    let item = Item::Bytes(vec![0x00]);
    assert_eq!(encode(&item), vec![0x00]);
    assert_eq!(decode(&[0x00]).unwrap(), item);
}

#[test]
fn long_string_uses_length_prefix() {
    let payload = vec![b'x'; 100];
    let item = Item::Bytes(payload.clone());
    let encoded = encode(&item);
    assert_eq!(encoded[0], 0xB8);
    assert_eq!(encoded[1], 100);
    assert_eq!(&encoded[2..], &payload[..]);
    assert_eq!(decode(&encoded).unwrap(), item);
}

#[test]
fn rejects_non_canonical_long_form_length() {
    // A length of 1 should never be emitted as a long-form string; 0xB8
    // 0x01 0xFF claims long form for a single byte that short form covers.
    let malformed = vec![0xB8, 0x01, 0xFF];
    assert!(decode(&malformed).is_err());
}
