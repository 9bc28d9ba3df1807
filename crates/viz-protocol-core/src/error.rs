//! Error types for the VIZ protocol core.

use thiserror::Error;

/// Errors raised by the binary wire codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// The value has no defined binary form.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// The buffer ended before the value was complete.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// A varint ran past 64 bits.
    #[error("varint overflows 64 bits")]
    VarintOverflow,

    /// Asset symbol names occupy a fixed 7-byte field.
    #[error("asset symbol {0:?} exceeds 7 bytes")]
    SymbolTooLong(String),

    /// Bytes were decoded but do not form a valid value.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Decoding finished with unread bytes left in the buffer.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

/// Core errors for parsing and constructing protocol primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("wire error: {0}")]
    Wire(#[from] WireError),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
