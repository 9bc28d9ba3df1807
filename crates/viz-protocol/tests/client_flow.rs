//! Prepare, sign and broadcast against an in-memory node.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use viz_protocol::ops::ops::{AuthorReward, Transfer};
use viz_protocol::rpc::transport::memory::{MemoryTransport, NodeReply, RpcCall};
use viz_protocol::{
    Asset, BlockId, ChainId, Client, ClientConfig, ClientError, Operation, PrivateKey, RpcError,
    Timestamp,
};

const HEAD_BLOCK_ID: &str = "0130c8f1a7c3be2e44c0b21e6f0d2bd5e0e6e0b1";
const HEAD_TIME: &str = "2024-01-01T00:00:00";

fn dgp(head_block_id: &str, time: &str) -> Value {
    json!({
        "head_block_number": 19974385,
        "head_block_id": head_block_id,
        "time": time,
        "current_witness": "alice",
        "last_irreversible_block_num": 19974370
    })
}

fn node(call: &RpcCall) -> NodeReply {
    match call.method.as_str() {
        "get_dynamic_global_properties" => NodeReply::Result(dgp(HEAD_BLOCK_ID, HEAD_TIME)),
        "broadcast_transaction" => NodeReply::Result(Value::Null),
        "broadcast_transaction_synchronous" => NodeReply::Result(json!({
            "id": "0000000000000000000000000000000000000000",
            "block_num": 19974386,
            "trx_num": 2,
            "expired": false
        })),
        "get_accounts" => NodeReply::Result(json!([])),
        other => NodeReply::error(-32601, format!("no method {other}")),
    }
}

fn transfer_op() -> Operation {
    Transfer {
        from: "alice".into(),
        to: "bob".into(),
        amount: Asset::viz(1000),
        memo: "thanks".into(),
    }
    .into()
}

#[tokio::test]
async fn test_prepare_uses_head_block() {
    let client = Client::new(MemoryTransport::new(node), ClientConfig::default());
    let tx = client.prepare([transfer_op()]).await.unwrap();

    let head: BlockId = HEAD_BLOCK_ID.parse().unwrap();
    assert_eq!(tx.ref_block_num, head.ref_block_num());
    assert_eq!(tx.ref_block_prefix, head.prefix());
    assert_eq!(tx.ref_block_num, 0xc8f1);
    assert_eq!(tx.ref_block_prefix, 0x2ebec3a7);
    assert_eq!(tx.expiration, Timestamp::from_secs(1_704_067_200 + 60));
    assert_eq!(tx.operations, vec![transfer_op()]);
}

#[tokio::test]
async fn test_prepare_respects_expiration_window() {
    let config = ClientConfig::default().with_expiration(Duration::from_secs(3600));
    let client = Client::new(MemoryTransport::new(node), config);
    let tx = client.prepare([transfer_op()]).await.unwrap();
    assert_eq!(tx.expiration, Timestamp::from_secs(1_704_067_200 + 3600));
}

#[tokio::test]
async fn test_prepare_rejects_virtual_operations() {
    let client = Client::new(MemoryTransport::new(node), ClientConfig::default());
    let reward = AuthorReward {
        author: "alice".into(),
        permlink: "post".into(),
        token_payout: Asset::viz(1),
        vesting_payout: Asset::vests(1),
    };
    let err = client.prepare([reward.into()]).await.unwrap_err();
    assert!(matches!(err, ClientError::Transaction(_)));

    let err = client.prepare(Vec::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::Transaction(_)));
}

#[tokio::test]
async fn test_multi_key_signing() {
    let client = Client::new(MemoryTransport::new(node), ClientConfig::default());
    let tx = client.prepare([transfer_op()]).await.unwrap();

    let active = PrivateKey::from_seed("alice-active").unwrap();
    let regular = PrivateKey::from_seed("alice-regular").unwrap();
    let signed = client.sign(tx, &[active.clone(), regular.clone()]).unwrap();

    assert_eq!(signed.chain_id(), Some(&ChainId::MAINNET));
    assert_eq!(
        signed.verify_signers(&ChainId::MAINNET).unwrap(),
        vec![active.public_key(), regular.public_key()]
    );
}

#[tokio::test]
async fn test_chain_id_separates_signatures() {
    let testnet = ChainId::from_bytes([0x42; 32]);
    let main = Client::new(MemoryTransport::new(node), ClientConfig::default());
    let test = Client::new(
        MemoryTransport::new(node),
        ClientConfig::default().with_chain_id(testnet),
    );
    let key = PrivateKey::from_seed("alice").unwrap();

    let tx = main.prepare([transfer_op()]).await.unwrap();
    let on_main = main.sign(tx.clone(), std::slice::from_ref(&key)).unwrap();
    let on_test = test.sign(tx, std::slice::from_ref(&key)).unwrap();

    assert_ne!(on_main.digest(), on_test.digest());
    assert_ne!(on_main.signatures(), on_test.signatures());
    assert_ne!(
        on_test.verify_signers(&ChainId::MAINNET).unwrap(),
        vec![key.public_key()]
    );
}

#[tokio::test]
async fn test_broadcast_returns_id() {
    let client = Client::new(MemoryTransport::new(node), ClientConfig::default());
    let key = PrivateKey::from_seed("alice").unwrap();
    let tx = client.prepare([transfer_op()]).await.unwrap();
    let signed = client.sign(tx, std::slice::from_ref(&key)).unwrap();

    let id = client.broadcast(&signed).await.unwrap();
    assert_eq!(id, signed.id().unwrap());

    let calls = client.rpc().transport().calls().await;
    let sent = &calls.last().unwrap().params[0];
    assert_eq!(calls.last().unwrap().namespace, "network_broadcast_api");
    assert_eq!(sent["operations"][0][0], json!("transfer"));
    assert_eq!(sent["signatures"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_transfer_helper() {
    let client = Client::new(MemoryTransport::new(node), ClientConfig::default());
    let key = PrivateKey::from_seed("alice").unwrap();

    let confirmation = client
        .transfer(&key, "alice", "bob", Asset::viz(2500), "rent")
        .await
        .unwrap();
    assert_eq!(confirmation.block_num, 19_974_386);
    assert_eq!(confirmation.trx_num, 2);

    let methods: Vec<String> = client
        .rpc()
        .transport()
        .calls()
        .await
        .into_iter()
        .map(|call| call.method)
        .collect();
    assert_eq!(
        methods,
        vec!["get_dynamic_global_properties", "broadcast_transaction_synchronous"]
    );
}

#[tokio::test]
async fn test_node_error_surfaces() {
    let transport = MemoryTransport::new(|call: &RpcCall| match call.method.as_str() {
        "get_dynamic_global_properties" => NodeReply::Result(dgp(HEAD_BLOCK_ID, HEAD_TIME)),
        _ => NodeReply::error(-32000, "missing required active authority"),
    });
    let client = Client::new(transport, ClientConfig::default());
    let key = PrivateKey::from_seed("mallory").unwrap();

    let err = client
        .transfer(&key, "alice", "mallory", Asset::viz(1), "")
        .await
        .unwrap_err();
    match err {
        ClientError::Rpc(RpcError::Response { code, message, .. }) => {
            assert_eq!(code, -32000);
            assert_eq!(message, "missing required active authority");
        }
        other => panic!("expected node error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_account_missing() {
    let client = Client::new(Arc::new(MemoryTransport::new(node)), ClientConfig::default());
    assert!(client.get_account("nobody").await.unwrap().is_none());
}

proptest! {
    #[test]
    fn prop_prepare_references_any_head(
        id in prop::array::uniform20(any::<u8>()),
        secs in 0u32..4_000_000_000,
    ) {
        let head = BlockId::from_bytes(id);
        let time = Timestamp::from_secs(secs);
        let reply = dgp(&head.to_hex(), &time.to_string());
        let client = Client::new(
            MemoryTransport::always(reply),
            ClientConfig::default().with_expiration(Duration::from_secs(60)),
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let tx = runtime.block_on(client.prepare([transfer_op()])).unwrap();

        prop_assert_eq!(tx.ref_block_num, head.ref_block_num());
        prop_assert_eq!(tx.ref_block_prefix, head.prefix());
        prop_assert_eq!(tx.expiration.as_secs(), secs + 60);
    }
}
