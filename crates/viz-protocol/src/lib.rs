//! # VIZ Protocol
//!
//! A client library for the VIZ blockchain: encode operations, sign
//! transactions offline, and talk to nodes over JSON-RPC.
//!
//! ## Overview
//!
//! - **Operations**: every chain operation as a typed payload, with the
//!   binary form nodes hash and the JSON form they accept
//! - **Transactions**: reference block, expiration, signatures bound to a
//!   chain id
//! - **Keys**: secp256k1 keys in WIF and `VIZ...` text form
//! - **RPC**: typed requests over a pluggable transport
//!
//! ## Usage
//!
//! ```rust,no_run
//! use viz_protocol::{Asset, Client, ClientConfig, PrivateKey};
//!
//! async fn example() -> viz_protocol::Result<()> {
//!     let client = Client::connect(ClientConfig::default())?;
//!     let key = PrivateKey::from_wif("5J9bWm2ThenDm3tjvmUgHtWCVMUdjRR1pxnRtnJjvKA4b2ut5WK")?;
//!
//!     let confirmation = client
//!         .transfer(&key, "alice", "bob", Asset::viz(1000), "")
//!         .await?;
//!     println!("included in block {}", confirmation.block_num);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `viz_protocol::core` - Codec, assets, timestamps, ids, keys
//! - `viz_protocol::ops` - Operations and transactions
//! - `viz_protocol::rpc` - JSON-RPC client and transports

pub mod client;
pub mod error;

pub use viz_protocol_core as core;
pub use viz_protocol_ops as ops;
pub use viz_protocol_rpc as rpc;

pub use client::{Client, ClientConfig};
pub use error::{ClientError, Result};

pub use viz_protocol_core::{
    Asset, BlockId, ChainId, Digest, PrivateKey, PublicKey, Signature, Timestamp, TransactionId,
};
pub use viz_protocol_ops::{
    Operation, OperationKind, SignedTransaction, Transaction, TransactionBuilder,
};
pub use viz_protocol_rpc::{BroadcastConfirmation, RpcClient, RpcConfig, RpcError, Transport};
