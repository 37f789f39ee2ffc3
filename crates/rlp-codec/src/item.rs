//! Recursive Length Prefix encoding and decoding.
//!
//! <https://eth.wiki/fundamentals/rlp>. The in-memory representation is the
//! tagged [`Item`] enum the spec calls for, rather than the dynamically-typed
//! nested lists the reference implementation decodes into.

use crate::error::RlpError;

/// An RLP value: either a byte string or a list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A byte string, including the empty string.
    Bytes(Vec<u8>),
    /// A list of items, recursively RLP-encoded.
    List(Vec<Item>),
}

impl Item {
    /// Convenience constructor for a byte-string item.
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Item::Bytes(b.into())
    }

    /// Convenience constructor for a list item.
    pub fn list(items: impl Into<Vec<Item>>) -> Self {
        Item::List(items.into())
    }

    /// Borrow the contents as a byte string, or error if this is a list.
    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            Item::Bytes(b) => Ok(b),
            Item::List(_) => Err(RlpError::UnexpectedShape),
        }
    }

    /// Borrow the contents as a list, or error if this is a byte string.
    pub fn as_list(&self) -> Result<&[Item], RlpError> {
        match self {
            Item::List(items) => Ok(items),
            Item::Bytes(_) => Err(RlpError::UnexpectedShape),
        }
    }

    /// Borrow the contents as a list of exactly `n` items.
    pub fn as_list_of(&self, n: usize) -> Result<&[Item], RlpError> {
        let items = self.as_list()?;
        if items.len() != n {
            return Err(RlpError::WrongArity {
                expected: n,
                actual: items.len(),
            });
        }
        Ok(items)
    }
}

/// Strips leading zero bytes, the minimal big-endian convention RLP uses
/// for integers (value 0 encodes as the empty string).
fn strip_leading_zeros(b: &[u8]) -> &[u8] {
    let first_nonzero = b.iter().position(|&x| x != 0).unwrap_or(b.len());
    &b[first_nonzero..]
}

/// Encodes an unsigned integer given as big-endian bytes (of any width) as
/// the minimal-length RLP byte string.
pub fn encode_uint_be(bytes: &[u8]) -> Item {
    Item::Bytes(strip_leading_zeros(bytes).to_vec())
}

/// Encodes a `u64` as the minimal-length RLP byte string.
pub fn encode_u64(value: u64) -> Item {
    encode_uint_be(&value.to_be_bytes())
}

/// Decodes a byte string as a `u64`, rejecting non-minimal encodings and
/// values too wide to fit.
pub fn decode_u64(item: &Item) -> Result<u64, RlpError> {
    let bytes = item.as_bytes()?;
    if bytes.len() > 8 {
        return Err(RlpError::IntegerTooWide { len: bytes.len() });
    }
    if !bytes.is_empty() && bytes[0] == 0 {
        return Err(RlpError::NonMinimalInteger { offset: 0 });
    }
    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(u64::from_be_bytes(buf))
}

/// Serializes an [`Item`] to its canonical RLP byte representation.
pub fn encode(item: &Item) -> Vec<u8> {
    match item {
        Item::Bytes(data) => encode_bytes(data),
        Item::List(items) => {
            let contents: Vec<u8> = items.iter().flat_map(encode).collect();
            encode_with_length_prefix(0xC0, 0xF7, &contents)
        }
    }
}

fn encode_bytes(data: &[u8]) -> Vec<u8> {
    if data.len() == 1 && data[0] < 0x80 {
        return data.to_vec();
    }
    encode_with_length_prefix(0x80, 0xB7, data)
}

/// Shared short/long length-prefix construction for byte strings (`short_base`
/// = 0x80, `long_base` = 0xB7) and lists (`short_base` = 0xC0, `long_base` = 0xF7).
fn encode_with_length_prefix(short_base: u8, long_base: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    if payload.len() <= 55 {
        out.push(short_base + payload.len() as u8);
    } else {
        let len_bytes = strip_leading_zeros(&(payload.len() as u64).to_be_bytes());
        out.push(long_base + len_bytes.len() as u8);
        out.extend_from_slice(len_bytes);
    }
    out.extend_from_slice(payload);
    out
}

/// Decodes a single RLP item starting at `bytes[start..]`, returning the
/// item and the number of bytes consumed.
fn decode_one(bytes: &[u8], start: usize) -> Result<(Item, usize), RlpError> {
    let first = *bytes
        .get(start)
        .ok_or(RlpError::UnexpectedEof { offset: start })?;

    if first <= 0x7F {
        return Ok((Item::Bytes(vec![first]), 1));
    }

    if first <= 0xBF {
        let (len, header_len) = decode_string_length(bytes, start, first)?;
        let payload_start = start + header_len;
        let payload_end = payload_start
            .checked_add(len)
            .ok_or(RlpError::UnexpectedEof { offset: start })?;
        let payload = bytes
            .get(payload_start..payload_end)
            .ok_or(RlpError::UnexpectedEof { offset: payload_start })?;
        if len == 1 && payload[0] < 0x80 {
            // A single byte below 0x80 must use its own one-byte encoding.
            return Err(RlpError::NonCanonicalLength { offset: start });
        }
        return Ok((Item::Bytes(payload.to_vec()), header_len + len));
    }

    // Lists.
    let (len, mut index) = if first <= 0xF7 {
        (first as usize - 0xC0, 1)
    } else {
        let length_of_length = first as usize - 0xF7;
        let (len, _) = decode_long_length(bytes, start, length_of_length)?;
        if len <= 55 {
            return Err(RlpError::NonCanonicalLength { offset: start });
        }
        (len, 1 + length_of_length)
    };

    let payload_start = start + index;
    let payload_end = payload_start
        .checked_add(len)
        .ok_or(RlpError::UnexpectedEof { offset: start })?;
    if payload_end > bytes.len() {
        return Err(RlpError::UnexpectedEof { offset: payload_start });
    }

    let mut items = Vec::new();
    let mut cursor = payload_start;
    while cursor < payload_end {
        let (item, consumed) = decode_one(bytes, cursor)?;
        cursor += consumed;
        items.push(item);
    }
    if cursor != payload_end {
        return Err(RlpError::UnexpectedEof { offset: payload_end });
    }
    index = cursor - start;

    Ok((Item::List(items), index))
}

/// Decodes the length of a short/long byte string given its tag byte,
/// returning `(payload_len, header_len)`.
fn decode_string_length(bytes: &[u8], start: usize, first: u8) -> Result<(usize, usize), RlpError> {
    if first <= 0xB7 {
        return Ok((first as usize - 0x80, 1));
    }
    let length_of_length = first as usize - 0xB7;
    let (len, _) = decode_long_length(bytes, start, length_of_length)?;
    if len <= 55 {
        return Err(RlpError::NonCanonicalLength { offset: start });
    }
    Ok((len, 1 + length_of_length))
}

/// Decodes a big-endian length field of `length_of_length` bytes immediately
/// following the tag byte at `start`, rejecting a leading zero byte.
fn decode_long_length(
    bytes: &[u8],
    start: usize,
    length_of_length: usize,
) -> Result<(usize, usize), RlpError> {
    let field_start = start + 1;
    let field = bytes
        .get(field_start..field_start + length_of_length)
        .ok_or(RlpError::UnexpectedEof { offset: field_start })?;
    if length_of_length == 0 || field[0] == 0 {
        return Err(RlpError::NonCanonicalLength { offset: start });
    }
    if length_of_length > std::mem::size_of::<usize>() {
        return Err(RlpError::IntegerTooWide { len: length_of_length });
    }
    let mut buf = [0u8; std::mem::size_of::<usize>()];
    buf[std::mem::size_of::<usize>() - length_of_length..].copy_from_slice(field);
    Ok((usize::from_be_bytes(buf), length_of_length))
}

/// Decodes a single RLP item, requiring the whole input to be consumed.
pub fn decode(bytes: &[u8]) -> Result<Item, RlpError> {
    let (item, consumed) = decode_one(bytes, 0)?;
    if consumed != bytes.len() {
        return Err(RlpError::TrailingBytes {
            extra: bytes.len() - consumed,
        });
    }
    Ok(item)
}

/// Lazily decodes a concatenation of top-level RLP items, e.g. a block
/// stream file of back-to-back `[header, transactions, uncles]` tuples.
pub struct DecodeMultiple<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for DecodeMultiple<'a> {
    type Item = Result<Item, RlpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.bytes.len() {
            return None;
        }
        match decode_one(self.bytes, self.offset) {
            Ok((item, consumed)) => {
                self.offset += consumed;
                Some(Ok(item))
            }
            Err(e) => {
                // Stop iterating after the first decoding fault; otherwise
                // we'd spin on the same offset forever.
                self.offset = self.bytes.len();
                Some(Err(e))
            }
        }
    }
}

/// Returns a streaming iterator over successive top-level RLP items packed
/// back-to-back in `bytes`.
pub fn decode_multiple(bytes: &[u8]) -> DecodeMultiple<'_> {
    DecodeMultiple { bytes, offset: 0 }
}
