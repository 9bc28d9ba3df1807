//! Golden transaction vector.
//!
//! Any implementation that signs VIZ transactions must reproduce these bytes
//! exactly: the transaction encoding, the digest over the mainnet chain id,
//! the transaction id, and the RFC 6979 signature.

use viz_protocol::core::{from_wire_bytes, Digest};
use viz_protocol::ops::ops::Transfer;
use viz_protocol::{
    Asset, ChainId, PrivateKey, SignedTransaction, Timestamp, Transaction, TransactionBuilder,
};

const REF_BLOCK_NUM: u16 = 12345;
const REF_BLOCK_PREFIX: u32 = 1_234_567_890;
const EXPIRATION: u32 = 1_704_067_200;

const SIGNER_SEED: &str = "alice";
const SIGNER_WIF: &str = "5J9bWm2ThenDm3tjvmUgHtWCVMUdjRR1pxnRtnJjvKA4b2ut5WK";
const SIGNER_PUBLIC: &str = "VIZ7zsqi7QUAjTAdyynd6DVe8uv4K8gCTRHnAoMN9w9CA1xLCTDVv";

const TX_HEX: &str =
    "3930d202964980009265010205616c69636503626f62e8030000000000000356495a000000000000";
const DIGEST_HEX: &str = "9514dee83641597426b3dc9ab8530657f8460bef525ef9ca9716a755dda1a8f5";
const TX_ID_HEX: &str = "502e2fb63d05f1dfdb91c5715cf61c8d14e356c4";
const SIGNATURE_HEX: &str = "1f7e624bdf49bf1be1388ff6f7a2b5115861b6ad454a85d9c614799eaae431bfc775dfec1f5cd88609c205b1dff074c81581fdd777180503da7c2d2fbf5cb0a986";

fn golden_transaction() -> Transaction {
    TransactionBuilder::new()
        .ref_block(REF_BLOCK_NUM, REF_BLOCK_PREFIX)
        .expiration(Timestamp::from_secs(EXPIRATION))
        .operation(Transfer {
            from: "alice".into(),
            to: "bob".into(),
            amount: "1.000 VIZ".parse::<Asset>().unwrap(),
            memo: String::new(),
        })
        .build()
        .unwrap()
}

#[test]
fn test_signer_key() {
    let key = PrivateKey::from_seed(SIGNER_SEED).unwrap();
    assert_eq!(key.to_wif(), SIGNER_WIF);
    assert_eq!(key.public_key().to_string(), SIGNER_PUBLIC);
    assert_eq!(PrivateKey::from_wif(SIGNER_WIF).unwrap(), key);
}

#[test]
fn test_transaction_bytes() {
    let tx = golden_transaction();
    assert_eq!(hex::encode(tx.to_bytes().unwrap()), TX_HEX);

    let decoded: Transaction = from_wire_bytes(&hex::decode(TX_HEX).unwrap()).unwrap();
    assert_eq!(decoded, tx);
}

#[test]
fn test_digest_and_id() {
    let tx = golden_transaction();
    assert_eq!(tx.digest(&ChainId::MAINNET).unwrap().to_hex(), DIGEST_HEX);
    assert_eq!(tx.id().unwrap().to_hex(), TX_ID_HEX);

    let mut input = ChainId::MAINNET.as_bytes().to_vec();
    input.extend_from_slice(&hex::decode(TX_HEX).unwrap());
    assert_eq!(Digest::sha256(&input).to_hex(), DIGEST_HEX);
}

#[test]
fn test_signature() {
    let key = PrivateKey::from_wif(SIGNER_WIF).unwrap();
    let signed = golden_transaction().sign(&key, &ChainId::MAINNET).unwrap();

    assert_eq!(signed.signatures().len(), 1);
    let signature = signed.signatures()[0];
    assert_eq!(signature.to_hex(), SIGNATURE_HEX);
    assert!(signature.is_canonical());

    let signers = signed.verify_signers(&ChainId::MAINNET).unwrap();
    assert_eq!(signers, vec![key.public_key()]);
}

#[test]
fn test_signed_bytes_round_trip() {
    let key = PrivateKey::from_wif(SIGNER_WIF).unwrap();
    let signed = golden_transaction().sign(&key, &ChainId::MAINNET).unwrap();

    let bytes = signed.to_bytes().unwrap();
    assert_eq!(hex::encode(&bytes), format!("{TX_HEX}01{SIGNATURE_HEX}"));

    let decoded: SignedTransaction = from_wire_bytes(&bytes).unwrap();
    assert_eq!(decoded, signed);
}

#[test]
fn test_broadcast_json() {
    let key = PrivateKey::from_wif(SIGNER_WIF).unwrap();
    let signed = golden_transaction().sign(&key, &ChainId::MAINNET).unwrap();

    assert_eq!(
        serde_json::to_value(&signed).unwrap(),
        serde_json::json!({
            "ref_block_num": 12345,
            "ref_block_prefix": 1234567890,
            "expiration": "2024-01-01T00:00:00",
            "operations": [["transfer", {
                "from": "alice",
                "to": "bob",
                "amount": "1.000 VIZ",
                "memo": ""
            }]],
            "extensions": [],
            "signatures": [SIGNATURE_HEX]
        })
    );
}
