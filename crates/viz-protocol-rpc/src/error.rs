//! Error types for RPC calls.

use serde_json::Value;
use thiserror::Error;

/// Boxed cause carried by network and coding errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while calling a node.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request never produced a usable HTTP reply.
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The node answered with a JSON-RPC error envelope.
    #[error("node error {code}: {message}")]
    Response {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    /// The request or response could not be converted to or from JSON.
    #[error("coding error: {message}")]
    Coding {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl RpcError {
    pub fn network(message: impl Into<String>) -> Self {
        RpcError::Network {
            message: message.into(),
            source: None,
        }
    }

    pub fn network_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn coding(message: impl Into<String>) -> Self {
        RpcError::Coding {
            message: message.into(),
            source: None,
        }
    }

    pub fn coding_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::Coding {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Message text without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            RpcError::Network { message, .. }
            | RpcError::Response { message, .. }
            | RpcError::Coding { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::coding_with("invalid json", err)
    }
}

/// Result type for RPC operations.
pub type Result<T> = std::result::Result<T, RpcError>;
