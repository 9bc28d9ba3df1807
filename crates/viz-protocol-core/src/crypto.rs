//! secp256k1 keys and recoverable signatures.
//!
//! Wraps `k256` with the chain's conventions: compressed public keys shown as
//! `VIZ` + base58(key || ripemd160(key)[..4]), WIF private keys, and 65-byte
//! compact signatures `[31 + recid, r, s]` that must pass the canonical
//! check nodes enforce.

use k256::ecdsa::signature::hazmat::{PrehashSigner, RandomizedPrehashSigner};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ripemd::{Digest as _, Ripemd160};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, WireError};
use crate::types::Digest;
use crate::wire::{WireDecode, WireDecoder, WireEncode, WireEncoder};

/// Default address prefix of the main network.
pub const ADDRESS_PREFIX: &str = "VIZ";

/// Version byte of WIF-encoded private keys.
const WIF_VERSION: u8 = 0x80;

/// Header byte offset for compact signatures over compressed keys.
const COMPACT_HEADER: u8 = 31;

/// Upper bound on signing attempts before giving up on a canonical signature.
const MAX_SIGN_ATTEMPTS: u32 = 64;

const CHECKSUM_LEN: usize = 4;

fn key_checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = Ripemd160::digest(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash[..CHECKSUM_LEN]);
    out
}

// ───────────────────────────────────────────────────────────────────────────
// Public keys
// ───────────────────────────────────────────────────────────────────────────

/// A compressed secp256k1 public key.
///
/// The all-zero key is accepted as a placeholder; nodes use it for accounts
/// with no memo key. It never verifies anything.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    pub const LEN: usize = 33;

    /// The placeholder key, `VIZ1111111111111111111111111111111114T1Anm`.
    pub const NULL: Self = Self([0u8; 33]);

    /// Build from SEC1 compressed bytes, validating the curve point.
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CoreError> {
        if bytes != Self::NULL.0 {
            VerifyingKey::from_sec1_bytes(&bytes)
                .map_err(|e| CoreError::InvalidPublicKey(format!("not a curve point: {e}")))?;
        }
        Ok(Self(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// Text form under an explicit network prefix.
    pub fn to_string_with_prefix(&self, prefix: &str) -> String {
        let mut data = Vec::with_capacity(Self::LEN + CHECKSUM_LEN);
        data.extend_from_slice(&self.0);
        data.extend_from_slice(&key_checksum(&self.0));
        format!("{prefix}{}", bs58::encode(data).into_string())
    }

    /// Parse the text form, requiring `prefix`.
    pub fn from_str_with_prefix(s: &str, prefix: &str) -> Result<Self, CoreError> {
        let encoded = s.strip_prefix(prefix).ok_or_else(|| {
            CoreError::InvalidPublicKey(format!("{s:?} lacks prefix {prefix:?}"))
        })?;
        let data = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| CoreError::InvalidPublicKey(format!("bad base58: {e}")))?;
        if data.len() != Self::LEN + CHECKSUM_LEN {
            return Err(CoreError::InvalidPublicKey(format!(
                "decoded {} bytes, expected {}",
                data.len(),
                Self::LEN + CHECKSUM_LEN
            )));
        }
        let (key, checksum) = data.split_at(Self::LEN);
        if key_checksum(key) != checksum {
            return Err(CoreError::InvalidPublicKey("checksum mismatch".into()));
        }
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(key);
        Self::from_bytes(bytes)
    }

    /// True if `signature` over `digest` was made by this key.
    pub fn verify(&self, digest: &Digest, signature: &Signature) -> bool {
        if self.is_null() {
            return false;
        }
        matches!(signature.recover(digest), Ok(key) if key == *self)
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        Self(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_prefix(ADDRESS_PREFIX))
    }
}

impl FromStr for PublicKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_with_prefix(s, ADDRESS_PREFIX)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl WireEncode for PublicKey {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_raw(&self.0);
        Ok(())
    }
}

impl WireDecode for PublicKey {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        let bytes = dec.get_array()?;
        Self::from_bytes(bytes).map_err(|e| WireError::InvalidValue(e.to_string()))
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Signatures
// ───────────────────────────────────────────────────────────────────────────

/// A 65-byte compact recoverable signature: header byte, then r and s.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 65]);

impl Signature {
    pub const LEN: usize = 65;

    pub const fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let mut arr = [0u8; 65];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Self(arr))
    }

    /// Whether nodes will accept this signature.
    ///
    /// Neither r nor s may have its top bit set, and neither may start with a
    /// zero byte unless the following byte needs it.
    pub fn is_canonical(&self) -> bool {
        let c = &self.0;
        c[1] & 0x80 == 0
            && !(c[1] == 0 && c[2] & 0x80 == 0)
            && c[33] & 0x80 == 0
            && !(c[33] == 0 && c[34] & 0x80 == 0)
    }

    fn recovery_id(&self) -> Result<RecoveryId, CoreError> {
        let header = self.0[0];
        let recid = match header {
            31..=34 => header - 31,
            27..=30 => header - 27,
            _ => {
                return Err(CoreError::InvalidSignature(format!(
                    "header byte {header}"
                )))
            }
        };
        RecoveryId::from_byte(recid)
            .ok_or_else(|| CoreError::InvalidSignature(format!("recovery id {recid}")))
    }

    /// Recover the public key that produced this signature over `digest`.
    pub fn recover(&self, digest: &Digest) -> Result<PublicKey, CoreError> {
        let recid = self.recovery_id()?;
        let sig = EcdsaSignature::from_slice(&self.0[1..])
            .map_err(|e| CoreError::InvalidSignature(e.to_string()))?;
        let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recid)
            .map_err(|e| CoreError::InvalidSignature(format!("recovery failed: {e}")))?;
        Ok(PublicKey::from_verifying_key(&key))
    }

    fn compact(sig: &EcdsaSignature, recid: RecoveryId) -> Self {
        let mut bytes = [0u8; 65];
        bytes[0] = COMPACT_HEADER + recid.to_byte();
        bytes[1..].copy_from_slice(&sig.to_bytes());
        Self(bytes)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl WireEncode for Signature {
    fn encode(&self, enc: &mut WireEncoder) -> Result<(), WireError> {
        enc.put_raw(&self.0);
        Ok(())
    }
}

impl WireDecode for Signature {
    fn decode(dec: &mut WireDecoder<'_>) -> Result<Self, WireError> {
        dec.get_array().map(Self)
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Private keys
// ───────────────────────────────────────────────────────────────────────────

/// A secp256k1 signing key.
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Generate a new random key.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    /// Create from a 32-byte secret scalar.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CoreError> {
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|_| CoreError::InvalidPrivateKey("scalar out of range".into()))?;
        Ok(Self { signing_key })
    }

    /// Derive the key whose secret is SHA-256 of `seed`.
    pub fn from_seed(seed: &str) -> Result<Self, CoreError> {
        Self::from_bytes(Digest::sha256(seed.as_bytes()).as_bytes())
    }

    /// Derive a role key from account credentials.
    ///
    /// Wallets compute the secret as SHA-256 of `account + role + password`,
    /// where role is `master`, `active`, `regular` or `memo`.
    pub fn from_login(account: &str, role: &str, password: &str) -> Result<Self, CoreError> {
        Self::from_seed(&format!("{account}{role}{password}"))
    }

    /// Parse a WIF string: base58check(0x80 || secret).
    pub fn from_wif(wif: &str) -> Result<Self, CoreError> {
        let data = bs58::decode(wif)
            .with_check(None)
            .into_vec()
            .map_err(|e| CoreError::InvalidPrivateKey(format!("bad WIF: {e}")))?;
        match data.split_first() {
            Some((&WIF_VERSION, secret)) if secret.len() == 32 => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(secret);
                Self::from_bytes(&bytes)
            }
            Some((version, _)) if *version != WIF_VERSION => Err(CoreError::InvalidPrivateKey(
                format!("WIF version byte {version:#04x}"),
            )),
            _ => Err(CoreError::InvalidPrivateKey(format!(
                "WIF payload of {} bytes",
                data.len()
            ))),
        }
    }

    pub fn to_wif(&self) -> String {
        let mut data = Vec::with_capacity(33);
        data.push(WIF_VERSION);
        data.extend_from_slice(&self.to_bytes());
        bs58::encode(data).with_check().into_string()
    }

    /// Raw secret scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a digest, producing a signature nodes accept as canonical.
    ///
    /// The first attempt is the deterministic RFC 6979 nonce. Later attempts
    /// mix extra entropy, derived from the digest and the attempt counter,
    /// into the nonce so the result stays reproducible for a given key and
    /// digest.
    pub fn sign(&self, digest: &Digest) -> Result<Signature, CoreError> {
        let (sig, recid): (EcdsaSignature, RecoveryId) = self
            .signing_key
            .sign_prehash(digest.as_bytes())
            .map_err(|e| CoreError::InvalidSignature(format!("signing failed: {e}")))?;
        let compact = Signature::compact(&sig, recid);
        if compact.is_canonical() {
            return Ok(compact);
        }

        let own = self.public_key();
        for attempt in 1..MAX_SIGN_ATTEMPTS {
            let seed = Digest::sha256_parts(&[digest.as_bytes(), &attempt.to_le_bytes()]);
            let mut rng = StdRng::from_seed(seed.0);
            let sig: EcdsaSignature = self
                .signing_key
                .sign_prehash_with_rng(&mut rng, digest.as_bytes())
                .map_err(|e| CoreError::InvalidSignature(format!("signing failed: {e}")))?;
            let Some(compact) = Self::with_recovery_id(&sig, digest, &own) else {
                continue;
            };
            if compact.is_canonical() {
                return Ok(compact);
            }
        }
        Err(CoreError::InvalidSignature(format!(
            "no canonical signature after {MAX_SIGN_ATTEMPTS} attempts"
        )))
    }

    /// Find the recovery id under which `sig` recovers to `own`.
    fn with_recovery_id(sig: &EcdsaSignature, digest: &Digest, own: &PublicKey) -> Option<Signature> {
        (0u8..4)
            .filter_map(RecoveryId::from_byte)
            .map(|recid| Signature::compact(sig, recid))
            .find(|candidate| matches!(candidate.recover(digest), Ok(key) if key == *own))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({})", self.public_key())
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl FromStr for PrivateKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wif(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // secret = sha256("test")
    const TEST_WIF: &str = "5K2YUVmWfxbmvsNxCsfvArXdGXm7d5DC9pn4yD75k2UaSYgkXTh";
    const TEST_PUB: &str = "VIZ5cYvx6NBYNdcJUym9WydRRs6329UTzJgzKii8dESmw2ZaA4fEH";

    #[test]
    fn test_wif_roundtrip() {
        let key = PrivateKey::from_wif(TEST_WIF).unwrap();
        assert_eq!(key, PrivateKey::from_seed("test").unwrap());
        assert_eq!(key.to_wif(), TEST_WIF);
    }

    #[test]
    fn test_public_key_text() {
        let key = PrivateKey::from_seed("test").unwrap();
        assert_eq!(key.public_key().to_string(), TEST_PUB);

        let parsed: PublicKey = TEST_PUB.parse().unwrap();
        assert_eq!(parsed, key.public_key());
    }

    #[test]
    fn test_public_key_rejects_bad_checksum() {
        let mut bad = TEST_PUB.to_string();
        bad.pop();
        bad.push('1');
        assert!(bad.parse::<PublicKey>().is_err());
        assert!("STM5cYvx6NBYNdcJUym9WydRRs6329UTzJgzKii8dESmw2ZaA4fEH"
            .parse::<PublicKey>()
            .is_err());
    }

    #[test]
    fn test_null_key() {
        let null: PublicKey = "VIZ1111111111111111111111111111111114T1Anm".parse().unwrap();
        assert!(null.is_null());
        assert_eq!(null.to_string(), "VIZ1111111111111111111111111111111114T1Anm");
    }

    #[test]
    fn test_login_derivation_is_concatenation() {
        let a = PrivateKey::from_login("alice", "active", "hunter2").unwrap();
        let b = PrivateKey::from_seed("aliceactivehunter2").unwrap();
        assert_eq!(a, b);
        let c = PrivateKey::from_login("alice", "regular", "hunter2").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_sign_recover_verify() {
        let key = PrivateKey::generate();
        let digest = Digest::sha256(b"payload");
        let sig = key.sign(&digest).unwrap();

        assert!(sig.is_canonical());
        assert!((31..=34).contains(&sig.0[0]));
        assert_eq!(sig.recover(&digest).unwrap(), key.public_key());
        assert!(key.public_key().verify(&digest, &sig));
        assert!(!key.public_key().verify(&Digest::sha256(b"other"), &sig));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let key = PrivateKey::from_seed("test").unwrap();
        for i in 0u32..32 {
            let digest = Digest::sha256(&i.to_le_bytes());
            let a = key.sign(&digest).unwrap();
            let b = key.sign(&digest).unwrap();
            assert_eq!(a, b);
            assert!(a.is_canonical());
        }
    }

    #[test]
    fn test_canonical_check() {
        let mut bytes = [0x11u8; 65];
        bytes[0] = 31;
        assert!(Signature(bytes).is_canonical());

        let mut high_r = bytes;
        high_r[1] = 0x80;
        assert!(!Signature(high_r).is_canonical());

        let mut padded_s = bytes;
        padded_s[33] = 0;
        padded_s[34] = 0x10;
        assert!(!Signature(padded_s).is_canonical());

        padded_s[34] = 0x90;
        assert!(Signature(padded_s).is_canonical());
    }

    #[test]
    fn test_signature_hex_json() {
        let sig = Signature([0x1f; 65]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json.len(), 132);
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn test_invalid_wif() {
        assert!(PrivateKey::from_wif("notakey").is_err());
        // Valid base58check, wrong version byte.
        let mut data = vec![0x81];
        data.extend_from_slice(&[1u8; 32]);
        let wif = bs58::encode(data).with_check().into_string();
        assert!(PrivateKey::from_wif(&wif).is_err());
    }
}
