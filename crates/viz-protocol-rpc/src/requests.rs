//! Typed requests.
//!
//! Each request knows its method name, how to lay out its positional
//! params, and what its result deserializes into. The namespace comes from
//! [`crate::api::namespace_for`].

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use viz_protocol_core::{PublicKey, TransactionId};
use viz_protocol_ops::SignedTransaction;

use crate::api;
use crate::error::Result;
use crate::responses::{
    Account, AppliedOperation, BlockHeader, BroadcastConfirmation, ChainProperties,
    CommitteeRequest, DynamicGlobalProperties, Invite, SignedBlock, Witness,
};

/// A call with a fixed method and a typed result.
pub trait RpcRequest: Send + Sync {
    /// Node method name.
    const METHOD: &'static str;

    /// What the `result` field deserializes into.
    type Response: DeserializeOwned + Send;

    /// Positional params.
    fn params(&self) -> Result<Vec<Value>>;

    fn namespace(&self) -> &'static str {
        api::namespace_for(Self::METHOD)
    }
}

/// Declare a request that takes no params.
macro_rules! no_params_request {
    ($(#[$meta:meta])* $name:ident, $method:literal, $response:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl RpcRequest for $name {
            const METHOD: &'static str = $method;
            type Response = $response;

            fn params(&self) -> Result<Vec<Value>> {
                Ok(Vec::new())
            }
        }
    };
}

no_params_request!(
    GetDynamicGlobalProperties,
    "get_dynamic_global_properties",
    DynamicGlobalProperties
);
no_params_request!(
    /// Median of the witnesses' voted properties.
    GetChainProperties,
    "get_chain_properties",
    ChainProperties
);
no_params_request!(GetAccountCount, "get_account_count", u64);
no_params_request!(
    /// Names of the witnesses in the current round.
    GetActiveWitnesses,
    "get_active_witnesses",
    Vec<String>
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAccounts {
    pub names: Vec<String>,
}

impl GetAccounts {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl RpcRequest for GetAccounts {
    const METHOD: &'static str = "get_accounts";
    type Response = Vec<Account>;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![json!(self.names)])
    }
}

/// Account names in order, starting at `lower_bound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupAccounts {
    pub lower_bound: String,
    pub limit: u32,
}

impl RpcRequest for LookupAccounts {
    const METHOD: &'static str = "lookup_accounts";
    type Response = Vec<String>;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![json!(self.lower_bound), json!(self.limit)])
    }
}

/// Header of a block; `None` past the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBlockHeader {
    pub block_num: u32,
}

impl RpcRequest for GetBlockHeader {
    const METHOD: &'static str = "get_block_header";
    type Response = Option<BlockHeader>;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![json!(self.block_num)])
    }
}

/// Full block; `None` past the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBlock {
    pub block_num: u32,
}

impl RpcRequest for GetBlock {
    const METHOD: &'static str = "get_block";
    type Response = Option<SignedBlock>;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![json!(self.block_num)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetOpsInBlock {
    pub block_num: u32,
    pub only_virtual: bool,
}

impl RpcRequest for GetOpsInBlock {
    const METHOD: &'static str = "get_ops_in_block";
    type Response = Vec<AppliedOperation>;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![json!(self.block_num), json!(self.only_virtual)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetTransaction {
    pub id: TransactionId,
}

impl RpcRequest for GetTransaction {
    const METHOD: &'static str = "get_transaction";
    type Response = SignedTransaction;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![json!(self.id.to_hex())])
    }
}

/// Hex of the transaction bytes as the node serializes them.
#[derive(Debug, Clone, PartialEq)]
pub struct GetTransactionHex {
    pub transaction: SignedTransaction,
}

impl RpcRequest for GetTransactionHex {
    const METHOD: &'static str = "get_transaction_hex";
    type Response = String;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![serde_json::to_value(&self.transaction)?])
    }
}

/// Up to `limit` history entries ending at sequence `from`; `-1` means the
/// latest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAccountHistory {
    pub account: String,
    pub from: i64,
    pub limit: u32,
}

impl GetAccountHistory {
    pub fn latest(account: impl Into<String>, limit: u32) -> Self {
        Self {
            account: account.into(),
            from: -1,
            limit,
        }
    }
}

impl RpcRequest for GetAccountHistory {
    const METHOD: &'static str = "get_account_history";
    type Response = Vec<(u64, AppliedOperation)>;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![
            json!(self.account),
            json!(self.from),
            json!(self.limit),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetWitnessByAccount {
    pub account: String,
}

impl RpcRequest for GetWitnessByAccount {
    const METHOD: &'static str = "get_witness_by_account";
    type Response = Option<Witness>;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![json!(self.account)])
    }
}

/// Accounts referencing each key, one list per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetKeyReferences {
    pub keys: Vec<PublicKey>,
}

impl RpcRequest for GetKeyReferences {
    const METHOD: &'static str = "get_key_references";
    type Response = Vec<Vec<String>>;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![serde_json::to_value(&self.keys)?])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetInviteByKey {
    pub key: PublicKey,
}

impl RpcRequest for GetInviteByKey {
    const METHOD: &'static str = "get_invite_by_key";
    type Response = Invite;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![serde_json::to_value(self.key)?])
    }
}

/// A committee request with up to `votes_count` votes; `-1` for all of
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCommitteeRequest {
    pub request_id: u32,
    pub votes_count: i32,
}

impl RpcRequest for GetCommitteeRequest {
    const METHOD: &'static str = "get_committee_request";
    type Response = CommitteeRequest;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![json!(self.request_id), json!(self.votes_count)])
    }
}

/// Submit a transaction without waiting for inclusion.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastTransaction {
    pub transaction: SignedTransaction,
}

impl RpcRequest for BroadcastTransaction {
    const METHOD: &'static str = "broadcast_transaction";
    type Response = Value;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![serde_json::to_value(&self.transaction)?])
    }
}

/// Submit a transaction and wait until it is in a block.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastTransactionSynchronous {
    pub transaction: SignedTransaction,
}

impl RpcRequest for BroadcastTransactionSynchronous {
    const METHOD: &'static str = "broadcast_transaction_synchronous";
    type Response = BroadcastConfirmation;

    fn params(&self) -> Result<Vec<Value>> {
        Ok(vec![serde_json::to_value(&self.transaction)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_protocol_core::PrivateKey;

    #[test]
    fn test_namespaces() {
        assert_eq!(GetDynamicGlobalProperties.namespace(), "database_api");
        assert_eq!(GetAccountHistory::latest("a", 1).namespace(), "account_history");
        assert_eq!(
            GetOpsInBlock { block_num: 1, only_virtual: false }.namespace(),
            "operation_history"
        );
        assert_eq!(GetActiveWitnesses.namespace(), "witness_api");
        assert_eq!(GetKeyReferences { keys: vec![] }.namespace(), "account_by_key");
        assert_eq!(
            GetCommitteeRequest { request_id: 1, votes_count: -1 }.namespace(),
            "committee_api"
        );
        assert_eq!(
            GetInviteByKey { key: PublicKey::NULL }.namespace(),
            "invite_api"
        );
    }

    #[test]
    fn test_params_layout() {
        assert!(GetChainProperties.params().unwrap().is_empty());
        assert_eq!(
            GetAccounts::new(["alice", "bob"]).params().unwrap(),
            vec![json!(["alice", "bob"])]
        );
        assert_eq!(
            GetAccountHistory::latest("alice", 100).params().unwrap(),
            vec![json!("alice"), json!(-1), json!(100)]
        );
        assert_eq!(
            LookupAccounts { lower_bound: "a".into(), limit: 10 }.params().unwrap(),
            vec![json!("a"), json!(10)]
        );
    }

    #[test]
    fn test_key_params_use_text_form() {
        let key = PrivateKey::from_seed("test").unwrap().public_key();
        assert_eq!(
            GetKeyReferences { keys: vec![key] }.params().unwrap(),
            vec![json!(["VIZ5cYvx6NBYNdcJUym9WydRRs6329UTzJgzKii8dESmw2ZaA4fEH"])]
        );
    }
}
