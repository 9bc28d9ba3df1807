//! Fixed-size hash identifiers.
//!
//! All identifiers are newtypes over byte arrays. JSON carries them as
//! lowercase hex; the wire carries the raw bytes with no length prefix.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::WireError;
use crate::wire::{WireDecode, WireDecoder, WireEncode, WireEncoder};

macro_rules! hash_newtype {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
                let mut arr = [0u8; $len];
                hex::decode_to_slice(s, &mut arr)?;
                Ok(Self(arr))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), &self.to_hex()[..16])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = std::array::TryFromSliceError;

            fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
                let arr: [u8; $len] = slice.try_into()?;
                Ok(Self(arr))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }

        impl WireEncode for $name {
            fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
                enc.put_raw(&self.0);
                Ok(())
            }
        }

        impl WireDecode for $name {
            fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
                dec.get_array().map(Self)
            }
        }
    };
}

hash_newtype!(
    /// A 20-byte block identifier.
    ///
    /// The first four bytes are the big-endian block number; the next four,
    /// read little-endian, are the prefix transactions use as a reference.
    BlockId,
    20
);

hash_newtype!(
    /// A 32-byte network identifier mixed into every signing digest.
    ChainId,
    32
);

hash_newtype!(
    /// The first 20 bytes of SHA-256 over a transaction's unsigned bytes.
    TransactionId,
    20
);

hash_newtype!(
    /// A 32-byte SHA-256 digest.
    Digest,
    32
);

impl BlockId {
    pub fn block_num(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    pub fn prefix(&self) -> u32 {
        u32::from_le_bytes([self.0[4], self.0[5], self.0[6], self.0[7]])
    }

    /// Low 16 bits of the block number, as stored in `ref_block_num`.
    pub fn ref_block_num(&self) -> u16 {
        (self.block_num() & 0xffff) as u16
    }
}

impl ChainId {
    /// The VIZ main network.
    pub const MAINNET: Self = Self([
        0x20, 0x40, 0xef, 0xfd, 0xa1, 0x78, 0xd4, 0xff, 0xff, 0xf5, 0xea, 0xb7, 0xa9, 0x15,
        0xd4, 0x01, 0x98, 0x79, 0xf5, 0x20, 0x5c, 0xc5, 0x39, 0x2e, 0x4b, 0xcc, 0xed, 0x2b,
        0x6e, 0xdd, 0xa0, 0xcd,
    ]);
}

impl Default for ChainId {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl TransactionId {
    pub fn from_digest(digest: &Digest) -> Self {
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&digest.0[..20]);
        Self(arr)
    }
}

impl Digest {
    /// SHA-256 of a single buffer.
    pub fn sha256(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// SHA-256 over the concatenation of several buffers.
    pub fn sha256_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_fields() {
        let id = BlockId::from_hex("0130c8f1a7c3be2e44c0b21e6f0d2bd5e0e6e0b1").unwrap();
        assert_eq!(id.block_num(), 0x0130c8f1);
        assert_eq!(id.prefix(), 0x2ebec3a7);
        assert_eq!(id.ref_block_num(), 0xc8f1);
    }

    #[test]
    fn test_mainnet_chain_id() {
        assert_eq!(
            ChainId::MAINNET.to_hex(),
            "2040effda178d4fffff5eab7a915d4019879f5205cc5392e4bcced2b6edda0cd"
        );
    }

    #[test]
    fn test_hex_length_checked() {
        assert!(BlockId::from_hex("00ff").is_err());
        assert!(ChainId::from_hex("zz").is_err());
    }

    #[test]
    fn test_json_is_hex() {
        let id = TransactionId::from_bytes([0xab; 20]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(20)));
        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_sha256_parts_matches_concatenation() {
        let whole = Digest::sha256(b"hello world");
        let parts = Digest::sha256_parts(&[b"hello", b" ", b"world"]);
        assert_eq!(whole, parts);
        assert_eq!(
            whole.to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_wire_is_raw() {
        let id = BlockId::from_bytes([7; 20]);
        let bytes = crate::wire::to_wire_bytes(&id).unwrap();
        assert_eq!(bytes, vec![7; 20]);
        assert_eq!(crate::wire::from_wire_bytes::<BlockId>(&bytes).unwrap(), id);
    }
}
