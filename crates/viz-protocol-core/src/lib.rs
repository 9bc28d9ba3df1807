//! # VIZ Protocol Core
//!
//! Pure primitives for talking to the VIZ blockchain: the consensus binary
//! codec, assets, timestamps, hash identifiers, and secp256k1 keys.
//!
//! This crate performs no I/O. Everything here is deterministic computation
//! except [`PrivateKey::generate`].
//!
//! ## Key Types
//!
//! - [`WireEncoder`] / [`WireDecoder`] - Canonical binary serialization
//! - [`Asset`] - Fixed-point amount with a symbol
//! - [`Timestamp`] - Seconds since the Unix epoch, u32 on the wire
//! - [`ChainId`] / [`BlockId`] / [`Digest`] - Hash identifiers
//! - [`PrivateKey`] / [`PublicKey`] / [`Signature`] - Keys and recoverable signatures
//!
//! ## Encoding
//!
//! Every value that appears inside a transaction implements [`WireEncode`];
//! the bytes it writes are what gets hashed and signed. See the [`wire`]
//! module for the layout rules.

pub mod asset;
pub mod crypto;
pub mod error;
pub mod serde_helpers;
pub mod timestamp;
pub mod types;
pub mod wire;

pub use asset::{Asset, Symbol};
pub use crypto::{PrivateKey, PublicKey, Signature, ADDRESS_PREFIX};
pub use error::{CoreError, Result, WireError};
pub use timestamp::Timestamp;
pub use types::{BlockId, ChainId, Digest, TransactionId};
pub use wire::{from_wire_bytes, to_wire_bytes, Varint, WireDecode, WireDecoder, WireEncode, WireEncoder};
