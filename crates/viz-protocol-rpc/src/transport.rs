//! Transport abstraction for RPC calls.
//!
//! A transport moves one JSON body to a node and returns the raw HTTP reply.
//! Interpreting the reply (status, envelope, id) is the client's job, so a
//! transport never looks inside the body.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::error::{Result, RpcError};

/// Status and body of an HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Something that can POST a JSON-RPC body to a node.
///
/// Implementations must be thread-safe (Send + Sync). Retries, pooling and
/// failover belong here, not in the client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` and return whatever the node answered.
    ///
    /// Only failures to obtain a reply are errors; a 500 with a body is
    /// still a reply.
    async fn post(&self, body: String) -> Result<HttpReply>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn post(&self, body: String) -> Result<HttpReply> {
        (**self).post(body).await
    }
}

/// HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| RpcError::network_with(format!("invalid endpoint {endpoint:?}"), err))?;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|err| RpcError::network_with("initialising HTTP client", err))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, body: String) -> Result<HttpReply> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| RpcError::network_with("request failed", err))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| RpcError::network_with("reading response body", err))?;

        Ok(HttpReply { status, body })
    }
}

/// An in-memory node for testing.
///
/// A handler closure decides what the node answers to each call. Every call
/// is recorded so tests can inspect ids, namespaces and params afterwards.
pub mod memory {
    use super::*;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tokio::sync::Mutex;

    /// A decoded incoming call.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RpcCall {
        pub id: Value,
        pub namespace: String,
        pub method: String,
        pub params: Vec<Value>,
    }

    impl RpcCall {
        fn parse(body: &str) -> Result<Self> {
            #[derive(Deserialize)]
            struct Incoming {
                id: Value,
                params: (String, String, Vec<Value>),
            }

            let incoming: Incoming = serde_json::from_str(body)?;
            let (namespace, method, params) = incoming.params;
            Ok(Self {
                id: incoming.id,
                namespace,
                method,
                params,
            })
        }
    }

    /// What the node answers.
    #[derive(Debug, Clone, PartialEq)]
    pub enum NodeReply {
        /// A result envelope echoing the request id.
        Result(Value),
        /// An error envelope echoing the request id.
        Error {
            code: i64,
            message: String,
            data: Option<Value>,
        },
        /// Exactly this HTTP reply, untouched.
        Raw(HttpReply),
    }

    impl NodeReply {
        pub fn error(code: i64, message: impl Into<String>) -> Self {
            NodeReply::Error {
                code,
                message: message.into(),
                data: None,
            }
        }

        fn render(self, id: &Value) -> HttpReply {
            match self {
                NodeReply::Result(result) => HttpReply::ok(
                    json!({"jsonrpc": "2.0", "id": id, "result": result}).to_string(),
                ),
                NodeReply::Error {
                    code,
                    message,
                    data,
                } => HttpReply::ok(
                    json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": {"code": code, "message": message, "data": data}
                    })
                    .to_string(),
                ),
                NodeReply::Raw(reply) => reply,
            }
        }
    }

    type Handler = Box<dyn Fn(&RpcCall) -> NodeReply + Send + Sync>;

    /// In-memory transport implementation.
    pub struct MemoryTransport {
        handler: Handler,
        calls: Mutex<Vec<RpcCall>>,
        delay: Option<Duration>,
    }

    impl MemoryTransport {
        pub fn new<F>(handler: F) -> Self
        where
            F: Fn(&RpcCall) -> NodeReply + Send + Sync + 'static,
        {
            Self {
                handler: Box::new(handler),
                calls: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        /// Answer every call with the same result.
        pub fn always(result: Value) -> Self {
            Self::new(move |_| NodeReply::Result(result.clone()))
        }

        /// Wait this long before answering.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Calls received so far, oldest first.
        pub async fn calls(&self) -> Vec<RpcCall> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl Transport for MemoryTransport {
        async fn post(&self, body: String) -> Result<HttpReply> {
            let call = RpcCall::parse(&body)?;

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let reply = (self.handler)(&call);
            let id = call.id.clone();
            self.calls.lock().await.push(call);
            Ok(reply.render(&id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{MemoryTransport, NodeReply};
    use super::*;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_memory_transport_echoes_id() {
        let transport = MemoryTransport::always(json!(42));
        let body = json!({
            "id": 9,
            "jsonrpc": "2.0",
            "method": "call",
            "params": ["database_api", "get_account_count", []]
        })
        .to_string();

        let reply = transport.post(body).await.unwrap();
        assert_eq!(reply.status, 200);
        let value: Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(value["id"], json!(9));
        assert_eq!(value["result"], json!(42));

        let calls = transport.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].namespace, "database_api");
        assert_eq!(calls[0].method, "get_account_count");
    }

    #[tokio::test]
    async fn test_memory_transport_raw_reply() {
        let transport = MemoryTransport::new(|_| {
            NodeReply::Raw(HttpReply {
                status: 502,
                body: "bad gateway".into(),
            })
        });
        let body = json!({"id": 1, "params": ["a", "b", []]}).to_string();
        let reply = transport.post(body).await.unwrap();
        assert_eq!(reply.status, 502);
        assert_eq!(reply.body, "bad gateway");
    }

    #[tokio::test]
    async fn test_memory_transport_rejects_garbage() {
        let transport = MemoryTransport::always(Value::Null);
        assert!(transport.post("not json".into()).await.is_err());
    }

    #[test]
    fn test_http_transport_rejects_bad_endpoint() {
        let err = HttpTransport::new("not a url", "test", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, RpcError::Network { .. }));
    }
}
