//! Error types for the client.

use thiserror::Error;
use viz_protocol_core::CoreError;
use viz_protocol_ops::TransactionError;
use viz_protocol_rpc::RpcError;

/// Errors that can occur while preparing, signing or broadcasting.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Node call failed.
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError),

    /// Transaction could not be built or signed.
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// `sign` was called with an empty key list.
    #[error("no signing keys given")]
    NoSigningKeys,
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
