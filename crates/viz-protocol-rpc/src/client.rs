//! The JSON-RPC client.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::error::{Result, RpcError};
use crate::messages::{RequestEnvelope, ResponseEnvelope};
use crate::requests::RpcRequest;
use crate::transport::{HttpTransport, Transport};

/// Public node used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://node.viz.cx";

/// Configuration for an RPC client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    /// Node URL.
    pub endpoint: String,
    /// Upper bound for a single call, including reading the body.
    pub timeout: Duration,
    /// Sent as the `User-Agent` header.
    pub user_agent: String,
    /// Use this id for every request instead of a counter.
    pub fixed_id: Option<u64>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("viz-protocol-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            fixed_id: None,
        }
    }
}

impl RpcConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_fixed_id(mut self, id: u64) -> Self {
        self.fixed_id = Some(id);
        self
    }
}

/// Request id source. Counts up from 1 unless pinned to a fixed id.
#[derive(Debug)]
pub struct RequestIds {
    next: AtomicU64,
    fixed: Option<u64>,
}

impl RequestIds {
    pub fn new(fixed: Option<u64>) -> Self {
        Self {
            next: AtomicU64::new(1),
            fixed,
        }
    }

    pub fn next_id(&self) -> u64 {
        match self.fixed {
            Some(id) => id,
            None => self.next.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl Default for RequestIds {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Sends typed requests to a node and decodes typed results.
///
/// One HTTP request per call, no batching. Calls may run concurrently;
/// responses are matched to requests by id only.
pub struct RpcClient<T: Transport> {
    transport: T,
    config: RpcConfig,
    ids: RequestIds,
}

impl RpcClient<HttpTransport> {
    /// Client over HTTP to `config.endpoint`.
    pub fn connect(config: RpcConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.endpoint, &config.user_agent, config.timeout)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> RpcClient<T> {
    pub fn new(transport: T, config: RpcConfig) -> Self {
        let ids = RequestIds::new(config.fixed_id);
        Self {
            transport,
            config,
            ids,
        }
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a typed request and decode its result.
    pub async fn call<R: RpcRequest>(&self, request: &R) -> Result<R::Response> {
        let params = request.params()?;
        let result = self.call_raw(request.namespace(), R::METHOD, params).await?;
        decode_result(R::METHOD, result)
    }

    /// Send `call(namespace, method, params)` and return the raw result.
    ///
    /// An absent result comes back as `Value::Null`.
    pub async fn call_raw(
        &self,
        namespace: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value> {
        let id = self.ids.next_id();
        let body = serde_json::to_string(&RequestEnvelope::call(id, namespace, method, params))
            .map_err(|err| RpcError::coding_with("encoding request", err))?;

        debug!(id, namespace, method, "sending rpc call");
        trace!(id, %body, "rpc request body");

        let pending = self.transport.post(body);
        let reply = match tokio::time::timeout(self.config.timeout, pending).await {
            Ok(reply) => reply?,
            Err(_) => {
                return Err(RpcError::network(format!(
                    "{method} timed out after {:?}",
                    self.config.timeout
                )))
            }
        };

        trace!(id, status = reply.status, body = %reply.body, "rpc response body");

        if reply.status != 200 {
            return Err(RpcError::network(format!(
                "unexpected HTTP status {}",
                reply.status
            )));
        }
        if reply.body.trim().is_empty() {
            return Err(RpcError::network("empty response body"));
        }

        let response: ResponseEnvelope = serde_json::from_str(&reply.body)
            .map_err(|err| RpcError::coding_with("malformed response envelope", err))?;

        if let Some(error) = response.error {
            warn!(id, method, code = error.code, message = %error.message, "node returned error");
            return Err(RpcError::Response {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        if !response.id_matches(id) {
            warn!(id, received = ?response.id, method, "response id mismatch");
            return Err(RpcError::network("Request id mismatch"));
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}

fn decode_result<D: DeserializeOwned>(method: &str, value: Value) -> Result<D> {
    let missing = value.is_null();
    serde_json::from_value(value).map_err(|err| {
        if missing {
            RpcError::coding_with(format!("{method} returned no result"), err)
        } else {
            RpcError::coding_with(format!("unexpected result for {method}"), err)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::{GetAccountCount, GetBlockHeader, GetDynamicGlobalProperties};
    use crate::transport::memory::{MemoryTransport, NodeReply};
    use crate::transport::HttpReply;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn client(transport: MemoryTransport) -> RpcClient<MemoryTransport> {
        RpcClient::new(transport, RpcConfig::default())
    }

    #[test]
    fn test_ids_count_from_one() {
        let ids = RequestIds::default();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 3);

        let fixed = RequestIds::new(Some(77));
        assert_eq!(fixed.next_id(), 77);
        assert_eq!(fixed.next_id(), 77);
    }

    #[test]
    fn test_config_setters() {
        let config = RpcConfig::default()
            .with_endpoint("http://127.0.0.1:8090")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("probe/1.0")
            .with_fixed_id(4);
        assert_eq!(config.endpoint, "http://127.0.0.1:8090");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "probe/1.0");
        assert_eq!(config.fixed_id, Some(4));
        assert!(RpcConfig::default().user_agent.starts_with("viz-protocol-rs/"));
    }

    #[tokio::test]
    async fn test_typed_call() {
        let rpc = client(MemoryTransport::always(json!(123456)));
        let count = rpc.call(&GetAccountCount).await.unwrap();
        assert_eq!(count, 123_456);

        let calls = rpc.transport().calls().await;
        assert_eq!(calls[0].id, json!(1));
        assert_eq!(calls[0].namespace, "database_api");
        assert_eq!(calls[0].method, "get_account_count");
        assert!(calls[0].params.is_empty());
    }

    #[tokio::test]
    async fn test_id_mismatch() {
        let rpc = client(MemoryTransport::new(|_| {
            NodeReply::Raw(HttpReply::ok(r#"{"jsonrpc":"2.0","id":999,"result":1}"#))
        }));
        let err = rpc.call(&GetAccountCount).await.unwrap_err();
        assert!(matches!(err, RpcError::Network { .. }));
        assert_eq!(err.message(), "Request id mismatch");
    }

    #[tokio::test]
    async fn test_non_200_wins_over_envelope() {
        let rpc = client(MemoryTransport::new(|_| {
            NodeReply::Raw(HttpReply {
                status: 500,
                body: r#"{"id":1,"error":{"code":1,"message":"x"}}"#.into(),
            })
        }));
        let err = rpc.call(&GetAccountCount).await.unwrap_err();
        assert!(matches!(err, RpcError::Network { .. }));
        assert!(err.message().contains("500"));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let rpc = client(MemoryTransport::new(|_| NodeReply::Raw(HttpReply::ok("  "))));
        let err = rpc.call(&GetAccountCount).await.unwrap_err();
        assert_eq!(err.message(), "empty response body");
    }

    #[tokio::test]
    async fn test_error_envelope_checked_before_id() {
        let rpc = client(MemoryTransport::new(|_| {
            NodeReply::Raw(HttpReply::ok(
                r#"{"id":555,"error":{"code":-32003,"message":"unknown key","data":{"name":"x"}}}"#,
            ))
        }));
        match rpc.call(&GetAccountCount).await.unwrap_err() {
            RpcError::Response {
                code,
                message,
                data,
            } => {
                assert_eq!(code, -32003);
                assert_eq!(message, "unknown key");
                assert_eq!(data, Some(json!({"name": "x"})));
            }
            other => panic!("expected node error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_null_result() {
        let rpc = client(MemoryTransport::always(Value::Null));

        let err = rpc.call(&GetDynamicGlobalProperties).await.unwrap_err();
        assert!(matches!(err, RpcError::Coding { .. }));
        assert!(err.message().contains("returned no result"));

        let header = rpc.call(&GetBlockHeader { block_num: 1 }).await.unwrap();
        assert!(header.is_none());
    }

    #[tokio::test]
    async fn test_wrong_result_shape() {
        let rpc = client(MemoryTransport::always(json!({"not": "a number"})));
        let err = rpc.call(&GetAccountCount).await.unwrap_err();
        assert!(matches!(err, RpcError::Coding { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_calls_get_distinct_ids() {
        let rpc = Arc::new(client(MemoryTransport::always(json!(1))));

        let mut handles = Vec::new();
        for _ in 0..32 {
            let rpc = Arc::clone(&rpc);
            handles.push(tokio::spawn(async move {
                rpc.call(&GetAccountCount).await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 1);
        }

        let ids: HashSet<u64> = rpc
            .transport()
            .calls()
            .await
            .iter()
            .map(|call| call.id.as_u64().unwrap())
            .collect();
        assert_eq!(ids.len(), 32);
        assert_eq!(ids.iter().min(), Some(&1));
        assert_eq!(ids.iter().max(), Some(&32));
    }

    #[tokio::test]
    async fn test_fixed_id_mode() {
        let rpc = RpcClient::new(
            MemoryTransport::always(json!(5)),
            RpcConfig::default().with_fixed_id(42),
        );
        rpc.call(&GetAccountCount).await.unwrap();
        rpc.call(&GetAccountCount).await.unwrap();

        let calls = rpc.transport().calls().await;
        assert!(calls.iter().all(|call| call.id == json!(42)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let rpc = RpcClient::new(
            MemoryTransport::always(json!(1)).with_delay(Duration::from_millis(500)),
            RpcConfig::default().with_timeout(Duration::from_millis(20)),
        );
        let err = rpc.call(&GetAccountCount).await.unwrap_err();
        assert!(matches!(err, RpcError::Network { .. }));
        assert!(err.message().contains("timed out"));
    }

    #[tokio::test]
    async fn test_call_raw_unmapped_method() {
        let rpc = client(MemoryTransport::always(json!("ok")));
        let value = rpc
            .call_raw("get_something_new", "get_something_new", vec![json!(1)])
            .await
            .unwrap();
        assert_eq!(value, json!("ok"));
        assert_eq!(rpc.transport().calls().await[0].params, vec![json!(1)]);
    }
}
