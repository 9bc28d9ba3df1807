//! Golden test vectors for deterministic verification.
//!
//! Any client that signs VIZ transactions must reproduce these values
//! byte for byte.

use viz_protocol_core::{Asset, ChainId, PrivateKey, Timestamp};
use viz_protocol_ops::ops::Transfer;
use viz_protocol_ops::{SignedTransaction, Transaction, TransactionBuilder};

/// A transaction vector: inputs plus every derived value.
#[derive(Debug, Clone)]
pub struct TransactionVector {
    pub name: &'static str,
    /// Seed for [`PrivateKey::from_seed`].
    pub signer_seed: &'static str,
    pub signer_wif: &'static str,
    pub signer_public: &'static str,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub expiration: u32,
    /// Chain id the digest is computed for (hex).
    pub chain_id: &'static str,
    pub transaction_hex: &'static str,
    pub digest_hex: &'static str,
    pub transaction_id_hex: &'static str,
    pub signature_hex: &'static str,
}

/// The reference transfer: `alice` sends `1.000 VIZ` to `bob` on mainnet.
pub const TRANSFER_VECTOR: TransactionVector = TransactionVector {
    name: "transfer alice -> bob",
    signer_seed: "alice",
    signer_wif: "5J9bWm2ThenDm3tjvmUgHtWCVMUdjRR1pxnRtnJjvKA4b2ut5WK",
    signer_public: "VIZ7zsqi7QUAjTAdyynd6DVe8uv4K8gCTRHnAoMN9w9CA1xLCTDVv",
    ref_block_num: 12345,
    ref_block_prefix: 1_234_567_890,
    expiration: 1_704_067_200, // 2024-01-01T00:00:00
    chain_id: "2040effda178d4fffff5eab7a915d4019879f5205cc5392e4bcced2b6edda0cd",
    transaction_hex:
        "3930d202964980009265010205616c69636503626f62e8030000000000000356495a000000000000",
    digest_hex: "9514dee83641597426b3dc9ab8530657f8460bef525ef9ca9716a755dda1a8f5",
    transaction_id_hex: "502e2fb63d05f1dfdb91c5715cf61c8d14e356c4",
    signature_hex: "1f7e624bdf49bf1be1388ff6f7a2b5115861b6ad454a85d9c614799eaae431bf\
                    c775dfec1f5cd88609c205b1dff074c81581fdd777180503da7c2d2fbf5cb0a986",
};

/// Key derivation vectors: seed, WIF, public key.
pub const KEY_VECTORS: &[(&str, &str, &str)] = &[
    (
        "test",
        "5K2YUVmWfxbmvsNxCsfvArXdGXm7d5DC9pn4yD75k2UaSYgkXTh",
        "VIZ5cYvx6NBYNdcJUym9WydRRs6329UTzJgzKii8dESmw2ZaA4fEH",
    ),
    (
        "alice",
        "5J9bWm2ThenDm3tjvmUgHtWCVMUdjRR1pxnRtnJjvKA4b2ut5WK",
        "VIZ7zsqi7QUAjTAdyynd6DVe8uv4K8gCTRHnAoMN9w9CA1xLCTDVv",
    ),
];

/// Varint vectors: value and its encoding (hex).
pub const VARINT_VECTORS: &[(u64, &str)] = &[
    (0, "00"),
    (127, "7f"),
    (128, "8001"),
    (300, "ac02"),
    (16_384, "808001"),
    (u32::MAX as u64, "ffffffff0f"),
];

/// Asset vectors: text, amount, precision.
pub const ASSET_VECTORS: &[(&str, i64, u8)] = &[
    ("50.000 VIZ", 50_000, 3),
    ("1.5 CUSTOM", 15, 1),
    ("0.000001 SHARES", 1, 6),
    ("-2.250 VIZ", -2_250, 3),
    ("42 TOKEN", 42, 0),
];

/// The unsigned transaction described by `vector`.
pub fn transaction_from_vector(vector: &TransactionVector) -> Transaction {
    TransactionBuilder::new()
        .ref_block(vector.ref_block_num, vector.ref_block_prefix)
        .expiration(Timestamp::from_secs(vector.expiration))
        .operation(Transfer {
            from: "alice".into(),
            to: "bob".into(),
            amount: Asset::viz(1000),
            memo: String::new(),
        })
        .build()
        .expect("golden transaction is valid")
}

/// The vector's transaction signed by its signer.
pub fn signed_from_vector(vector: &TransactionVector) -> SignedTransaction {
    let key = PrivateKey::from_seed(vector.signer_seed).expect("seed derives a valid key");
    let chain_id = ChainId::from_hex(vector.chain_id).expect("vector chain id is hex");
    transaction_from_vector(vector)
        .sign(&key, &chain_id)
        .expect("golden transaction signs")
}

/// Recompute every derived value and report mismatches by field name.
pub fn verify_transaction_vector(vector: &TransactionVector) -> Vec<&'static str> {
    let mut mismatches = Vec::new();
    let key = PrivateKey::from_seed(vector.signer_seed).expect("seed derives a valid key");
    if key.to_wif() != vector.signer_wif {
        mismatches.push("signer_wif");
    }
    if key.public_key().to_string() != vector.signer_public {
        mismatches.push("signer_public");
    }

    let tx = transaction_from_vector(vector);
    let chain_id = ChainId::from_hex(vector.chain_id).expect("vector chain id is hex");
    let bytes = tx.to_bytes().expect("golden transaction encodes");
    if hex::encode(bytes) != vector.transaction_hex {
        mismatches.push("transaction_hex");
    }
    if tx.digest(&chain_id).map(|d| d.to_hex()).ok().as_deref() != Some(vector.digest_hex) {
        mismatches.push("digest_hex");
    }
    if tx.id().map(|id| id.to_hex()).ok().as_deref() != Some(vector.transaction_id_hex) {
        mismatches.push("transaction_id_hex");
    }

    let signed = signed_from_vector(vector);
    if signed.signatures().first().map(|s| s.to_hex()).as_deref() != Some(vector.signature_hex) {
        mismatches.push("signature_hex");
    }
    mismatches
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_protocol_core::{to_wire_bytes, Varint};

    #[test]
    fn test_transfer_vector_matches() {
        assert_eq!(verify_transaction_vector(&TRANSFER_VECTOR), Vec::<&str>::new());
    }

    #[test]
    fn test_vector_chain_is_mainnet() {
        assert_eq!(
            ChainId::from_hex(TRANSFER_VECTOR.chain_id).unwrap(),
            ChainId::MAINNET
        );
    }

    #[test]
    fn test_key_vectors() {
        for (seed, wif, public) in KEY_VECTORS {
            let key = PrivateKey::from_seed(seed).unwrap();
            assert_eq!(key.to_wif(), *wif, "wif for seed {seed}");
            assert_eq!(key.public_key().to_string(), *public, "public key for seed {seed}");
        }
    }

    #[test]
    fn test_varint_vectors() {
        for (value, expected) in VARINT_VECTORS {
            let bytes = to_wire_bytes(&Varint(*value)).unwrap();
            assert_eq!(hex::encode(bytes), *expected, "varint {value}");
        }
    }

    #[test]
    fn test_asset_vectors() {
        for (text, amount, precision) in ASSET_VECTORS {
            let asset: Asset = text.parse().unwrap();
            assert_eq!(asset.amount(), *amount, "{text}");
            assert_eq!(asset.precision(), *precision, "{text}");
            assert_eq!(asset.to_string(), *text);
        }
    }
}
