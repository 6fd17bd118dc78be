//! Participation bitfields.
//!
//! Bit `i` records whether committee member `i` took part. Bits are packed
//! most-significant-first, so member 0 is the high bit of byte 0. The length
//! is always a whole number of bytes: `ceil(committee_size / 8)`.

use bitvec::prelude::*;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};

/// Packed MSB-first participation bitmap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitfield {
    #[serde(with = "bitfield_serde")]
    bits: BitVec<u8, Msb0>,
}

mod bitfield_serde {
    use bitvec::prelude::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(bits: &BitVec<u8, Msb0>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        bits.as_raw_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BitVec<u8, Msb0>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        Ok(BitVec::from_vec(bytes))
    }
}

impl Bitfield {
    /// Number of bytes needed for `bit_count` members.
    pub fn byte_length(bit_count: usize) -> usize {
        bit_count.div_ceil(8)
    }

    /// All-zero bitfield sized for `bit_count` members.
    pub fn with_capacity(bit_count: usize) -> Self {
        Self::from_bytes(vec![0u8; Self::byte_length(bit_count)])
    }

    /// Bitfield sized for `bit_count` members with only `index` set.
    pub fn single(bit_count: usize, index: usize) -> Self {
        let mut field = Self::with_capacity(bit_count);
        field.set(index);
        field
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bits: BitVec::from_vec(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    pub fn byte_len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Bit capacity (always a multiple of 8).
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Set bit `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index).map(|bit| *bit).unwrap_or(false)
    }

    /// Number of set bits.
    pub fn vote_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Indices of set bits, ascending.
    pub fn set_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// True if any bit at position `>= index` is set.
    pub fn has_bits_from(&self, index: usize) -> bool {
        index < self.bits.len() && self.bits[index..].any()
    }

    /// Bitwise OR. The result is as long as the longer operand.
    pub fn or(&self, other: &Bitfield) -> Bitfield {
        let (long, short) = if self.bits.len() >= other.bits.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut bytes = long.as_bytes().to_vec();
        for (dst, src) in bytes.iter_mut().zip(short.as_bytes()) {
            *dst |= *src;
        }
        Bitfield::from_bytes(bytes)
    }

    /// True if every bit set in `other` is also set in `self`.
    pub fn covers(&self, other: &Bitfield) -> bool {
        self.or(other) == *self
    }
}

impl Encodable for Bitfield {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(self.as_bytes());
    }
}

impl Decodable for Bitfield {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        Ok(Self::from_bytes(rlp.as_val()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_length() {
        assert_eq!(Bitfield::byte_length(0), 0);
        assert_eq!(Bitfield::byte_length(1), 1);
        assert_eq!(Bitfield::byte_length(8), 1);
        assert_eq!(Bitfield::byte_length(9), 2);
    }

    #[test]
    fn test_msb_first_layout() {
        let field = Bitfield::single(10, 0);
        assert_eq!(field.as_bytes(), &[0b1000_0000, 0]);
        let field = Bitfield::single(10, 9);
        assert_eq!(field.as_bytes(), &[0, 0b0100_0000]);
    }

    #[test]
    fn test_vote_count_and_indices() {
        let mut field = Bitfield::with_capacity(16);
        field.set(3);
        field.set(12);
        assert_eq!(field.vote_count(), 2);
        assert_eq!(field.set_indices().collect::<Vec<_>>(), vec![3, 12]);
        assert!(field.get(3));
        assert!(!field.get(4));
        assert!(!field.get(100));
    }

    #[test]
    fn test_or_and_covers() {
        let a = Bitfield::single(8, 1);
        let b = Bitfield::single(8, 6);
        let merged = a.or(&b);
        assert_eq!(merged.as_bytes(), &[0b0100_0010]);
        assert!(merged.covers(&a));
        assert!(merged.covers(&b));
        assert!(!a.covers(&b));
    }

    #[test]
    fn test_has_bits_from() {
        let field = Bitfield::single(8, 5);
        assert!(field.has_bits_from(5));
        assert!(!field.has_bits_from(6));
        assert!(!field.has_bits_from(8));
    }

    #[test]
    fn test_set_out_of_range_ignored() {
        let mut field = Bitfield::with_capacity(8);
        field.set(8);
        assert_eq!(field.vote_count(), 0);
    }

    #[test]
    fn test_bitfields_inside_list_roundtrip() {
        let fields = vec![
            Bitfield::single(16, 3),
            Bitfield::with_capacity(0),
            Bitfield::single(130, 129),
        ];
        let bytes = rlp::encode_list(&fields);
        let payload = 3 + 1 + (1 + 17);
        assert_eq!(bytes.len(), 1 + payload);
        assert_eq!(bytes[0] as usize, 0xc0 + payload);

        let decoded: Vec<Bitfield> = rlp::decode_list(&bytes);
        assert_eq!(decoded, fields);
    }
}
