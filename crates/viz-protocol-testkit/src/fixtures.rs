//! Test fixtures and a mock node.
//!
//! [`MockNode`] answers the calls a client makes while preparing and
//! broadcasting transactions. It checks signatures against the keys of the
//! accounts it knows, so tests exercise the whole sign-then-broadcast path.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use viz_protocol_core::{Asset, BlockId, ChainId, PrivateKey, PublicKey, Timestamp};
use viz_protocol_ops::ops::Transfer;
use viz_protocol_ops::{Operation, SignedTransaction, TransactionBuilder};
use viz_protocol_rpc::transport::memory::{MemoryTransport, NodeReply, RpcCall};

/// Head block time the mock node starts at: 2024-01-01T00:00:00.
pub const GENESIS_TIME: u32 = 1_704_067_200;

/// Seconds between blocks.
pub const BLOCK_INTERVAL: u32 = 3;

/// A named account with a deterministic key.
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub account: String,
    pub key: PrivateKey,
    pub chain_id: ChainId,
}

impl TestFixture {
    /// Account `name` whose key is derived from the name.
    pub fn new(name: &str) -> Self {
        Self::with_seed(name, name)
    }

    pub fn with_seed(name: &str, seed: &str) -> Self {
        Self {
            account: name.to_string(),
            key: PrivateKey::from_seed(seed).expect("sha256 of a seed is a valid scalar"),
            chain_id: ChainId::MAINNET,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// A transfer from this account.
    pub fn transfer(&self, to: &str, amount: Asset, memo: &str) -> Operation {
        Transfer {
            from: self.account.clone(),
            to: to.to_string(),
            amount,
            memo: memo.to_string(),
        }
        .into()
    }

    /// Sign `operations` against a fixed reference block.
    pub fn sign(&self, operations: Vec<Operation>) -> SignedTransaction {
        TransactionBuilder::new()
            .ref_block(1, 0)
            .expiration(Timestamp::from_secs(GENESIS_TIME + 60))
            .operations(operations)
            .sign(&self.key, &self.chain_id)
            .expect("fixture transaction signs")
    }
}

/// Fixtures for several distinct accounts: `user0`, `user1`, ...
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| TestFixture::new(&format!("user{i}")))
        .collect()
}

#[derive(Debug)]
struct NodeState {
    chain_id: ChainId,
    head_block_number: u32,
    accounts: BTreeMap<String, PublicKey>,
    broadcasts: Vec<SignedTransaction>,
}

impl NodeState {
    fn head_time(&self) -> Timestamp {
        Timestamp::from_secs(GENESIS_TIME + self.head_block_number * BLOCK_INTERVAL)
    }

    fn head_block_id(&self) -> BlockId {
        let mut bytes = [0u8; 20];
        bytes[..4].copy_from_slice(&self.head_block_number.to_be_bytes());
        bytes[4..8].copy_from_slice(&(self.head_block_number ^ 0x5a5a_5a5a).to_le_bytes());
        BlockId::from_bytes(bytes)
    }

    fn dynamic_global_properties(&self) -> Value {
        json!({
            "head_block_number": self.head_block_number,
            "head_block_id": self.head_block_id(),
            "time": self.head_time(),
            "current_witness": "witness",
            "last_irreversible_block_num": self.head_block_number.saturating_sub(15),
        })
    }

    fn account(&self, name: &str, key: &PublicKey) -> Value {
        let authority = json!({"weight_threshold": 1, "account_auths": [], "key_auths": [[key, 1]]});
        json!({
            "id": self.accounts.keys().position(|n| n == name).unwrap_or(0),
            "name": name,
            "master_authority": authority,
            "active_authority": authority,
            "regular_authority": authority,
            "memo_key": key,
            "created": Timestamp::from_secs(GENESIS_TIME),
            "balance": "100.000 VIZ",
            "vesting_shares": "50.000000 SHARES",
        })
    }

    fn broadcast(&mut self, params: &[Value]) -> std::result::Result<u32, NodeReply> {
        let signed: SignedTransaction = params
            .first()
            .cloned()
            .and_then(|tx| serde_json::from_value(tx).ok())
            .ok_or_else(|| NodeReply::error(-32602, "invalid transaction"))?;
        signed
            .transaction()
            .validate()
            .map_err(|err| NodeReply::error(-32000, err.to_string()))?;

        let signers = signed
            .verify_signers(&self.chain_id)
            .map_err(|err| NodeReply::error(-32000, err.to_string()))?;
        let known = signers
            .iter()
            .any(|key| self.accounts.values().any(|k| k == key));
        if !known {
            return Err(NodeReply::error(-32000, "missing required active authority"));
        }

        self.broadcasts.push(signed);
        self.head_block_number += 1;
        Ok(self.head_block_number)
    }

    fn handle(&mut self, call: &RpcCall) -> NodeReply {
        match call.method.as_str() {
            "get_dynamic_global_properties" => NodeReply::Result(self.dynamic_global_properties()),
            "get_account_count" => NodeReply::Result(json!(self.accounts.len())),
            "get_accounts" => {
                let requested = call
                    .params
                    .first()
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                let found = requested
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(|name| self.accounts.get(name).map(|key| self.account(name, key)))
                    .collect();
                NodeReply::Result(Value::Array(found))
            }
            "broadcast_transaction" => match self.broadcast(&call.params) {
                Ok(_) => NodeReply::Result(json!({})),
                Err(reply) => reply,
            },
            "broadcast_transaction_synchronous" => match self.broadcast(&call.params) {
                Ok(block_num) => {
                    let id = self.broadcasts.last().and_then(|tx| tx.id().ok());
                    NodeReply::Result(json!({
                        "id": id,
                        "block_num": block_num,
                        "trx_num": 0,
                        "expired": false,
                    }))
                }
                Err(reply) => reply,
            },
            other => NodeReply::error(-32601, format!("method {other} not found")),
        }
    }
}

/// An in-memory node with accounts, a moving head block and a broadcast log.
#[derive(Debug, Clone)]
pub struct MockNode {
    state: Arc<Mutex<NodeState>>,
}

impl MockNode {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(NodeState {
                chain_id: ChainId::MAINNET,
                head_block_number: 1000,
                accounts: BTreeMap::new(),
                broadcasts: Vec::new(),
            })),
        }
    }

    /// Register an account whose every authority is `key`.
    pub fn with_account(self, name: &str, key: PublicKey) -> Self {
        self.lock().accounts.insert(name.to_string(), key);
        self
    }

    /// Register the fixture's account and key.
    pub fn with_fixture(self, fixture: &TestFixture) -> Self {
        let key = fixture.public_key();
        self.with_account(&fixture.account, key)
    }

    /// A transport that routes calls to this node.
    pub fn transport(&self) -> MemoryTransport {
        let state = Arc::clone(&self.state);
        MemoryTransport::new(move |call| {
            let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            state.handle(call)
        })
    }

    pub fn head_block_id(&self) -> BlockId {
        self.lock().head_block_id()
    }

    pub fn head_time(&self) -> Timestamp {
        self.lock().head_time()
    }

    /// Transactions accepted so far, oldest first.
    pub fn broadcasts(&self) -> Vec<SignedTransaction> {
        self.lock().broadcasts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, NodeState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_protocol::{Client, ClientConfig, ClientError, RpcError};

    #[test]
    fn test_fixture_signs() {
        let alice = TestFixture::new("alice");
        let signed = alice.sign(vec![alice.transfer("bob", Asset::viz(1), "")]);
        assert_eq!(
            signed.verify_signers(&ChainId::MAINNET).unwrap(),
            vec![alice.public_key()]
        );
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_fixtures(3);
        let keys: Vec<_> = parties.iter().map(|p| p.public_key()).collect();
        assert_ne!(keys[0], keys[1]);
        assert_ne!(keys[1], keys[2]);
        assert_ne!(keys[0], keys[2]);
    }

    #[tokio::test]
    async fn test_mock_node_accepts_known_signer() {
        let alice = TestFixture::new("alice");
        let node = MockNode::new().with_fixture(&alice);
        let client = Client::new(node.transport(), ClientConfig::default());

        let head = node.head_block_id();
        let tx = client.prepare([alice.transfer("bob", Asset::viz(5), "hi")]).await.unwrap();
        assert_eq!(tx.ref_block_num, head.ref_block_num());
        assert_eq!(tx.ref_block_prefix, head.prefix());

        let signed = client.sign(tx, std::slice::from_ref(&alice.key)).unwrap();
        let confirmation = client.broadcast_synchronous(&signed).await.unwrap();
        assert_eq!(confirmation.block_num, 1001);
        assert_eq!(confirmation.id, signed.id().unwrap());
        assert_eq!(node.broadcasts(), vec![signed]);
    }

    #[tokio::test]
    async fn test_mock_node_rejects_unknown_signer() {
        let alice = TestFixture::new("alice");
        let mallory = TestFixture::new("mallory");
        let node = MockNode::new().with_fixture(&alice);
        let client = Client::new(node.transport(), ClientConfig::default());

        let err = client
            .transfer(&mallory.key, "alice", "mallory", Asset::viz(1), "")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Rpc(RpcError::Response { code: -32000, .. })
        ));
        assert!(node.broadcasts().is_empty());
    }

    #[tokio::test]
    async fn test_mock_node_accounts() {
        let alice = TestFixture::new("alice");
        let node = MockNode::new().with_fixture(&alice);
        let client = Client::new(node.transport(), ClientConfig::default());

        let account = client.get_account("alice").await.unwrap().unwrap();
        assert_eq!(account.memo_key, alice.public_key());
        assert!(client.get_account("bob").await.unwrap().is_none());
    }
}
