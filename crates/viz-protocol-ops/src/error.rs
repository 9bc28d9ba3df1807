//! Error types for operations and transactions.

use thiserror::Error;
use viz_protocol_core::{CoreError, WireError};

/// Errors raised while building, encoding or signing transactions.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The transaction breaks a rule checked before signing.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Co-signing needs the digest cached by a first signature.
    #[error("transaction has not been signed yet; no digest to co-sign")]
    NotSigned,

    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for transaction operations.
pub type Result<T> = std::result::Result<T, TransactionError>;
