//! Opaque key and signature bytes.
//!
//! The core never interprets these; a `SignatureProvider` does. Keeping them
//! as plain byte strings lets entities be encoded and hashed without linking
//! a pairing library.

use std::fmt;

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Serialized public key.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PublicKey(#[serde_as(as = "Bytes")] pub Vec<u8>);

/// Serialized (possibly aggregate) signature.
///
/// The empty value stands for "unsigned" and is what the signing payload of
/// a block carries in place of the real signature.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] pub Vec<u8>);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Signature {
    /// The unsigned placeholder.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PublicKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for Signature {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(0x{})", hex::encode(&self.0))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "Signature(empty)");
        }
        write!(f, "Signature(0x{}..)", crate::hashing::short_hex(&self.0))
    }
}

impl Encodable for PublicKey {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

impl Decodable for PublicKey {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        Ok(Self(rlp.as_val()?))
    }
}

impl Encodable for Signature {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

impl Decodable for Signature {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        Ok(Self(rlp.as_val()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    /// Two-item list holding a key and a signature.
    struct Pair(PublicKey, Signature);

    impl Encodable for Pair {
        fn rlp_append(&self, s: &mut RlpStream) {
            s.begin_list(2);
            s.append(&self.0);
            s.append(&self.1);
        }
    }

    impl Decodable for Pair {
        fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
            codec::expect_list(rlp, 2)?;
            Ok(Self(rlp.val_at(0)?, rlp.val_at(1)?))
        }
    }

    #[test]
    fn test_key_is_one_list_item() {
        let pair = Pair(PublicKey(vec![0xa1; 48]), Signature(vec![0xb2; 96]));
        let bytes = codec::encode(&pair);

        // 0xf8 <len>, then 0xb0 + 48 key bytes, then 0xb8 0x60 + 96 bytes
        assert_eq!(bytes[0], 0xf8);
        assert_eq!(bytes[1] as usize, bytes.len() - 2);
        assert_eq!(bytes.len(), 2 + (1 + 48) + (2 + 96));

        let decoded: Pair = codec::decode(&bytes).unwrap();
        assert_eq!(decoded.0, pair.0);
        assert_eq!(decoded.1, pair.1);
    }

    #[test]
    fn test_empty_signature_roundtrip() {
        let pair = Pair(PublicKey(vec![1; 48]), Signature::empty());
        let decoded: Pair = codec::decode(&codec::encode(&pair)).unwrap();
        assert!(decoded.1.is_empty());
    }
}
