//! Authorities, beneficiaries and extension slots shared by many operations.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use viz_protocol_core::{PublicKey, WireDecode, WireDecoder, WireEncode, WireEncoder, WireError};

use crate::ops::wire_struct;

wire_struct! {
    /// A weighted-threshold set of accounts and keys.
    ///
    /// An authority is satisfied when the weights of the approving accounts
    /// and keys sum to at least `weight_threshold`. Checking that is left to
    /// nodes; this type only carries the data.
    #[derive(Default)]
    pub struct Authority {
        pub weight_threshold: u32,
        pub account_auths: Vec<(String, u16)>,
        pub key_auths: Vec<(PublicKey, u16)>,
    }
}

impl Authority {
    /// Single key with weight 1 and threshold 1.
    pub fn from_key(key: PublicKey) -> Self {
        Self {
            weight_threshold: 1,
            account_auths: Vec::new(),
            key_auths: vec![(key, 1)],
        }
    }

    /// Single account with weight 1 and threshold 1.
    pub fn from_account(account: impl Into<String>) -> Self {
        Self {
            weight_threshold: 1,
            account_auths: vec![(account.into(), 1)],
            key_auths: Vec::new(),
        }
    }

    /// Every key listed, in order.
    pub fn keys(&self) -> impl Iterator<Item = &PublicKey> {
        self.key_auths.iter().map(|(key, _)| key)
    }
}

wire_struct! {
    /// A share of a payout routed to another account, in basis points.
    pub struct Beneficiary {
        pub account: String,
        pub weight: u16,
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Extension slots
// ───────────────────────────────────────────────────────────────────────────

/// Reserved extension slot whose only variant carries nothing.
///
/// JSON form is `[0, {}]`; binary form is the varint tag 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FutureExtension {
    #[default]
    Void,
}

/// Extension list carried by most operations and every transaction.
pub type Extensions = Vec<FutureExtension>;

impl WireEncode for FutureExtension {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        match self {
            FutureExtension::Void => enc.put_varint(0),
        }
        Ok(())
    }
}

impl WireDecode for FutureExtension {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        match dec.get_varint()? {
            0 => Ok(FutureExtension::Void),
            tag => Err(WireError::InvalidValue(format!("extension tag {tag}"))),
        }
    }
}

/// The empty JSON object in a `[tag, {}]` pair.
#[derive(Serialize)]
struct Empty {}

impl Serialize for FutureExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        match self {
            FutureExtension::Void => {
                tuple.serialize_element(&0u64)?;
                tuple.serialize_element(&Empty {})?;
            }
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for FutureExtension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (tag, _body): (u64, serde_json::Value) = Deserialize::deserialize(deserializer)?;
        match tag {
            0 => Ok(FutureExtension::Void),
            other => Err(de::Error::custom(format!("unknown extension tag {other}"))),
        }
    }
}

wire_struct! {
    /// Payload of the beneficiaries content extension.
    pub struct ContentBeneficiaries {
        pub beneficiaries: Vec<Beneficiary>,
    }
}

/// Extensions accepted by the `content` operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentExtension {
    /// Route part of the author reward to other accounts. Tag 0.
    Beneficiaries(ContentBeneficiaries),
}

impl ContentExtension {
    pub fn beneficiaries(list: Vec<Beneficiary>) -> Self {
        ContentExtension::Beneficiaries(ContentBeneficiaries {
            beneficiaries: list,
        })
    }

    fn tag(&self) -> u64 {
        match self {
            ContentExtension::Beneficiaries(_) => 0,
        }
    }
}

impl WireEncode for ContentExtension {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_varint(self.tag());
        match self {
            ContentExtension::Beneficiaries(payload) => payload.encode(enc),
        }
    }
}

impl WireDecode for ContentExtension {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        match dec.get_varint()? {
            0 => Ok(ContentExtension::Beneficiaries(dec.get()?)),
            tag => Err(WireError::InvalidValue(format!("content extension tag {tag}"))),
        }
    }
}

impl Serialize for ContentExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.tag())?;
        match self {
            ContentExtension::Beneficiaries(payload) => tuple.serialize_element(payload)?,
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for ContentExtension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairVisitor;

        impl<'de> Visitor<'de> for PairVisitor {
            type Value = ContentExtension;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [tag, payload] pair")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let tag: u64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let ext = match tag {
                    0 => ContentExtension::Beneficiaries(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(1, &self))?,
                    ),
                    other => {
                        return Err(de::Error::custom(format!(
                            "unknown content extension tag {other}"
                        )))
                    }
                };
                Ok(ext)
            }
        }

        deserializer.deserialize_seq(PairVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_protocol_core::{from_wire_bytes, to_wire_bytes, PrivateKey};

    #[test]
    fn test_authority_json_uses_pairs() {
        let auth = Authority::from_account("alice");
        let json = serde_json::to_value(&auth).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "weight_threshold": 1,
                "account_auths": [["alice", 1]],
                "key_auths": []
            })
        );
    }

    #[test]
    fn test_authority_wire_layout() {
        let key = PrivateKey::from_seed("auth").unwrap().public_key();
        let auth = Authority::from_key(key);
        let bytes = to_wire_bytes(&auth).unwrap();

        // threshold u32, zero account auths, one key auth (33 + 2 bytes)
        assert_eq!(&bytes[..5], &[1, 0, 0, 0, 0]);
        assert_eq!(bytes[5], 1);
        assert_eq!(&bytes[6..39], key.as_bytes());
        assert_eq!(&bytes[39..], &[1, 0]);
        assert_eq!(from_wire_bytes::<Authority>(&bytes).unwrap(), auth);
    }

    #[test]
    fn test_future_extension_forms() {
        let exts: Extensions = vec![FutureExtension::Void];
        assert_eq!(serde_json::to_string(&exts).unwrap(), "[[0,{}]]");
        assert_eq!(to_wire_bytes(&exts).unwrap(), vec![1, 0]);

        let back: Extensions = serde_json::from_str("[[0,{}]]").unwrap();
        assert_eq!(back, exts);
        assert!(serde_json::from_str::<Extensions>("[[3,{}]]").is_err());
    }

    #[test]
    fn test_content_extension_forms() {
        let ext = ContentExtension::beneficiaries(vec![Beneficiary {
            account: "bob".into(),
            weight: 2500,
        }]);
        let json = serde_json::to_string(&ext).unwrap();
        assert_eq!(json, r#"[0,{"beneficiaries":[{"account":"bob","weight":2500}]}]"#);
        assert_eq!(serde_json::from_str::<ContentExtension>(&json).unwrap(), ext);

        let bytes = to_wire_bytes(&ext).unwrap();
        assert_eq!(bytes, vec![0, 1, 3, b'b', b'o', b'b', 0xc4, 0x09]);
        assert_eq!(from_wire_bytes::<ContentExtension>(&bytes).unwrap(), ext);
    }
}
