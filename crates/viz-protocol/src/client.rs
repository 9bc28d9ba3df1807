//! The client: prepare, sign and broadcast transactions against a node.

use std::time::Duration;
use tracing::{debug, info};
use viz_protocol_core::{
    Asset, ChainId, CoreError, PrivateKey, PublicKey, TransactionId, ADDRESS_PREFIX,
};
use viz_protocol_ops::ops::Transfer;
use viz_protocol_ops::{Operation, SignedTransaction, Transaction, TransactionBuilder};
use viz_protocol_rpc::requests::{
    BroadcastTransaction, BroadcastTransactionSynchronous, GetAccounts, GetDynamicGlobalProperties,
};
use viz_protocol_rpc::{
    Account, BroadcastConfirmation, HttpTransport, RpcClient, RpcConfig, RpcRequest, Transport,
};

use crate::error::{ClientError, Result};

/// Configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Node connection settings.
    pub rpc: RpcConfig,
    /// Chain the signatures are bound to.
    pub chain_id: ChainId,
    /// Prefix of public keys in text form.
    pub address_prefix: String,
    /// How far past the head block time prepared transactions expire.
    pub expiration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            chain_id: ChainId::MAINNET,
            address_prefix: ADDRESS_PREFIX.to_string(),
            expiration: Duration::from_secs(60),
        }
    }
}

impl ClientConfig {
    pub fn with_rpc(mut self, rpc: RpcConfig) -> Self {
        self.rpc = rpc;
        self
    }

    pub fn with_chain_id(mut self, chain_id: ChainId) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_address_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.address_prefix = prefix.into();
        self
    }

    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }
}

/// A VIZ client.
///
/// Wraps an [`RpcClient`] with the chain settings needed to turn operations
/// into signed, broadcastable transactions:
///
/// 1. [`Client::prepare`] fetches the head block and fills in the reference
///    block and expiration.
/// 2. [`Client::sign`] signs for the configured chain id.
/// 3. [`Client::broadcast`] or [`Client::broadcast_synchronous`] submits.
pub struct Client<T: Transport> {
    rpc: RpcClient<T>,
    config: ClientConfig,
}

impl Client<HttpTransport> {
    /// Client over HTTP to `config.rpc.endpoint`.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let rpc = RpcClient::connect(config.rpc.clone())?;
        Ok(Self { rpc, config })
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let rpc = RpcClient::new(transport, config.rpc.clone());
        Self { rpc, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rpc(&self) -> &RpcClient<T> {
        &self.rpc
    }

    /// Send any typed request.
    pub async fn call<R: RpcRequest>(&self, request: &R) -> Result<R::Response> {
        Ok(self.rpc.call(request).await?)
    }

    /// Look up one account by name.
    pub async fn get_account(&self, name: &str) -> Result<Option<Account>> {
        let mut accounts = self.rpc.call(&GetAccounts::new([name])).await?;
        Ok(accounts.pop().filter(|account| account.name == name))
    }

    /// Build an unsigned transaction referencing the current head block.
    pub async fn prepare(
        &self,
        operations: impl IntoIterator<Item = Operation>,
    ) -> Result<Transaction> {
        let props = self.rpc.call(&GetDynamicGlobalProperties).await?;
        debug!(
            head = props.head_block_number,
            time = %props.time,
            "preparing transaction"
        );
        let tx = TransactionBuilder::new()
            .reference_block(&props.head_block_id)
            .expire_after(props.time, self.config.expiration)?
            .operations(operations)
            .build()?;
        Ok(tx)
    }

    /// Sign with every key, in order, for the configured chain.
    pub fn sign(&self, transaction: Transaction, keys: &[PrivateKey]) -> Result<SignedTransaction> {
        if keys.is_empty() {
            return Err(ClientError::NoSigningKeys);
        }
        let mut signed = SignedTransaction::unsigned(transaction);
        for key in keys {
            signed.sign(key, &self.config.chain_id)?;
        }
        Ok(signed)
    }

    /// Submit without waiting for inclusion. Returns the transaction id.
    pub async fn broadcast(&self, signed: &SignedTransaction) -> Result<TransactionId> {
        let id = signed.id()?;
        info!(%id, "broadcasting transaction");
        self.rpc
            .call(&BroadcastTransaction {
                transaction: signed.clone(),
            })
            .await?;
        Ok(id)
    }

    /// Submit and wait until the transaction is in a block.
    pub async fn broadcast_synchronous(
        &self,
        signed: &SignedTransaction,
    ) -> Result<BroadcastConfirmation> {
        info!(id = %signed.id()?, "broadcasting transaction synchronously");
        let confirmation = self
            .rpc
            .call(&BroadcastTransactionSynchronous {
                transaction: signed.clone(),
            })
            .await?;
        debug!(
            block_num = confirmation.block_num,
            trx_num = confirmation.trx_num,
            "transaction included"
        );
        Ok(confirmation)
    }

    /// Prepare, sign and synchronously broadcast a single transfer.
    pub async fn transfer(
        &self,
        key: &PrivateKey,
        from: &str,
        to: &str,
        amount: Asset,
        memo: &str,
    ) -> Result<BroadcastConfirmation> {
        let op = Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            memo: memo.to_string(),
        };
        let tx = self.prepare([op.into()]).await?;
        let signed = self.sign(tx, std::slice::from_ref(key))?;
        self.broadcast_synchronous(&signed).await
    }

    /// Public key in text form with the configured prefix.
    pub fn format_key(&self, key: &PublicKey) -> String {
        key.to_string_with_prefix(&self.config.address_prefix)
    }

    /// Parse a public key written with the configured prefix.
    pub fn parse_key(&self, text: &str) -> std::result::Result<PublicKey, CoreError> {
        PublicKey::from_str_with_prefix(text, &self.config.address_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viz_protocol_rpc::transport::memory::MemoryTransport;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.chain_id, ChainId::MAINNET);
        assert_eq!(config.address_prefix, "VIZ");
        assert_eq!(config.expiration, Duration::from_secs(60));

        let custom = config
            .with_chain_id(ChainId::from_bytes([1; 32]))
            .with_address_prefix("TST")
            .with_expiration(Duration::from_secs(600));
        assert_eq!(custom.chain_id, ChainId::from_bytes([1; 32]));
        assert_eq!(custom.address_prefix, "TST");
        assert_eq!(custom.expiration, Duration::from_secs(600));
    }

    #[test]
    fn test_sign_needs_keys() {
        let client = Client::new(
            MemoryTransport::always(serde_json::Value::Null),
            ClientConfig::default(),
        );
        let tx = TransactionBuilder::new()
            .expiration(viz_protocol_core::Timestamp::from_secs(1_704_067_200))
            .operation(Transfer {
                from: "alice".into(),
                to: "bob".into(),
                amount: Asset::viz(1),
                memo: String::new(),
            })
            .build()
            .unwrap();
        assert!(matches!(client.sign(tx, &[]), Err(ClientError::NoSigningKeys)));
    }

    #[test]
    fn test_key_prefix() {
        let client = Client::new(
            MemoryTransport::always(serde_json::Value::Null),
            ClientConfig::default().with_address_prefix("TST"),
        );
        let key = PrivateKey::from_seed("test").unwrap().public_key();
        let text = client.format_key(&key);
        assert!(text.starts_with("TST"));
        assert_eq!(client.parse_key(&text).unwrap(), key);
        assert!(client.parse_key(&key.to_string()).is_err());
    }
}
