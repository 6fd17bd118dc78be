//! # Canonical Codec
//!
//! Every consensus entity has exactly one byte representation, used both for
//! hashing and for storage/wire transfer. The encoding is RLP with three
//! conventions layered on top:
//!
//! - Integers are minimal big-endian; zero is the empty string (`0x80`).
//! - Fixed-width byte fields (hashes, addresses, keys) are byte strings.
//! - An empty collection is the single sentinel byte `0x00`, never the empty
//!   list `0xc0`. Decoders reject `0xc0` where a collection is expected.
//!
//! Nested collections (committee tables, attestation lists, hash windows) are
//! lists of lists under the same rules.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::entities::Hash;
use crate::errors::{CodecError, CodecResult};
use crate::hashing::blake2b256;

/// Encoding of every empty collection.
pub const EMPTY_LIST_SENTINEL: u8 = 0x00;

/// Canonical bytes of `value`.
pub fn encode<T: Encodable>(value: &T) -> Vec<u8> {
    rlp::encode(value).to_vec()
}

/// BLAKE2b-256 over the canonical bytes of `value`.
pub fn canonical_hash<T: Encodable>(value: &T) -> Hash {
    blake2b256(&encode(value))
}

/// Decode a complete item; trailing bytes are an error.
pub fn decode<T: Decodable>(bytes: &[u8]) -> CodecResult<T> {
    let rlp = Rlp::new(bytes);
    let info = rlp.payload_info()?;
    let item_len = info.header_len + info.value_len;
    if item_len != bytes.len() {
        return Err(CodecError::TrailingBytes {
            item_len,
            input_len: bytes.len(),
        });
    }
    Ok(T::decode(&rlp)?)
}

// =============================================================================
// ENCODING HELPERS
// =============================================================================

/// Append a fixed-width byte field.
pub fn append_bytes(stream: &mut RlpStream, bytes: &[u8]) {
    stream.append(&bytes.to_vec());
}

/// Append a collection, or the sentinel when it is empty.
pub fn append_list<T: Encodable>(stream: &mut RlpStream, items: &[T]) {
    if items.is_empty() {
        stream.append_raw(&[EMPTY_LIST_SENTINEL], 1);
        return;
    }
    stream.begin_list(items.len());
    for item in items {
        stream.append(item);
    }
}

/// Append a list of hashes, or the sentinel when it is empty.
pub fn append_hash_list(stream: &mut RlpStream, hashes: &[Hash]) {
    if hashes.is_empty() {
        stream.append_raw(&[EMPTY_LIST_SENTINEL], 1);
        return;
    }
    stream.begin_list(hashes.len());
    for hash in hashes {
        append_bytes(stream, hash);
    }
}

/// Append a list of lists. Empty rows and an empty outer list both use the
/// sentinel.
pub fn append_nested_list<T: Encodable>(stream: &mut RlpStream, rows: &[Vec<T>]) {
    if rows.is_empty() {
        stream.append_raw(&[EMPTY_LIST_SENTINEL], 1);
        return;
    }
    stream.begin_list(rows.len());
    for row in rows {
        append_list(stream, row);
    }
}

// =============================================================================
// DECODING HELPERS
// =============================================================================

/// Require `rlp` to be a list of exactly `expected` items.
pub fn expect_list(rlp: &Rlp<'_>, expected: usize) -> Result<(), DecoderError> {
    if !rlp.is_list() {
        return Err(DecoderError::RlpExpectedToBeList);
    }
    if rlp.item_count()? != expected {
        return Err(DecoderError::RlpIncorrectListLen);
    }
    Ok(())
}

/// Decode a fixed-width byte field at `index`.
pub fn decode_fixed<const N: usize>(rlp: &Rlp<'_>, index: usize) -> Result<[u8; N], DecoderError> {
    let bytes: Vec<u8> = rlp.val_at(index)?;
    bytes
        .try_into()
        .map_err(|_| DecoderError::Custom("fixed-width field has wrong length"))
}

/// Decode the collection at `index` (sentinel or non-empty list).
pub fn decode_list<T: Decodable>(rlp: &Rlp<'_>, index: usize) -> Result<Vec<T>, DecoderError> {
    decode_list_item(&rlp.at(index)?)
}

/// Decode a list of hashes at `index`.
pub fn decode_hash_list(rlp: &Rlp<'_>, index: usize) -> Result<Vec<Hash>, DecoderError> {
    let item = rlp.at(index)?;
    let Some(count) = list_len(&item)? else {
        return Ok(Vec::new());
    };
    (0..count).map(|i| decode_fixed::<32>(&item, i)).collect()
}

/// Decode a list of lists at `index`.
pub fn decode_nested_list<T: Decodable>(
    rlp: &Rlp<'_>,
    index: usize,
) -> Result<Vec<Vec<T>>, DecoderError> {
    let item = rlp.at(index)?;
    let Some(count) = list_len(&item)? else {
        return Ok(Vec::new());
    };
    (0..count)
        .map(|i| item.at(i).and_then(|row| decode_list_item(&row)))
        .collect()
}

fn decode_list_item<T: Decodable>(item: &Rlp<'_>) -> Result<Vec<T>, DecoderError> {
    let Some(count) = list_len(item)? else {
        return Ok(Vec::new());
    };
    (0..count).map(|i| item.val_at(i)).collect()
}

/// `None` for the sentinel, `Some(n)` for a non-empty list.
fn list_len(item: &Rlp<'_>) -> Result<Option<usize>, DecoderError> {
    if item.is_data() {
        return if item.as_raw() == [EMPTY_LIST_SENTINEL] {
            Ok(None)
        } else {
            Err(DecoderError::RlpExpectedToBeList)
        };
    }
    match item.item_count()? {
        0 => Err(DecoderError::Custom("empty collection must use the sentinel byte")),
        count => Ok(Some(count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Numbers(Vec<u64>);

    impl Encodable for Numbers {
        fn rlp_append(&self, s: &mut RlpStream) {
            s.begin_list(1);
            append_list(s, &self.0);
        }
    }

    impl Decodable for Numbers {
        fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
            expect_list(rlp, 1)?;
            Ok(Self(decode_list(rlp, 0)?))
        }
    }

    #[test]
    fn test_integers_are_minimal_big_endian() {
        assert_eq!(encode(&0u64), vec![0x80]);
        assert_eq!(encode(&1u64), vec![0x01]);
        assert_eq!(encode(&0x0400u64), vec![0x82, 0x04, 0x00]);
    }

    #[test]
    fn test_empty_collection_is_sentinel() {
        assert_eq!(encode(&Numbers(vec![])), vec![0xc1, EMPTY_LIST_SENTINEL]);
    }

    #[test]
    fn test_empty_rlp_list_rejected() {
        // [[]] instead of [0x00]
        let bytes = vec![0xc1, 0xc0];
        assert!(decode::<Numbers>(&bytes).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode(&Numbers(vec![1, 2]));
        bytes.push(0x01);
        assert!(matches!(
            decode::<Numbers>(&bytes),
            Err(CodecError::TrailingBytes { .. })
        ));
    }

    #[test]
    fn test_list_roundtrip() {
        let bytes = encode(&Numbers(vec![0, 5, 300]));
        assert_eq!(decode::<Numbers>(&bytes).unwrap().0, vec![0, 5, 300]);
        assert!(decode::<Numbers>(&encode(&Numbers(vec![]))).unwrap().0.is_empty());
    }

    #[test]
    fn test_nested_list_with_empty_row() {
        let rows: Vec<Vec<u64>> = vec![vec![1], vec![], vec![2, 3]];
        let mut s = RlpStream::new_list(1);
        append_nested_list(&mut s, &rows);
        let bytes = s.out().to_vec();
        let decoded: Vec<Vec<u64>> = decode_nested_list(&Rlp::new(&bytes), 0).unwrap();
        assert_eq!(decoded, rows);
    }

    #[test]
    fn test_fixed_width_length_checked() {
        let mut s = RlpStream::new_list(1);
        append_bytes(&mut s, &[1u8; 31]);
        let bytes = s.out().to_vec();
        assert!(decode_fixed::<32>(&Rlp::new(&bytes), 0).is_err());
    }
}
