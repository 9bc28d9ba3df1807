//! # VIZ Protocol RPC
//!
//! JSON-RPC 2.0 client for VIZ nodes.
//!
//! ## Overview
//!
//! Every node call is `call(namespace, method, params)`. The namespace is
//! looked up in [`api::NAMESPACES`]; typed requests in [`requests`] pair a
//! method with its params and result type.
//!
//! ## Transport
//!
//! [`RpcClient`] is generic over [`Transport`]. [`HttpTransport`] talks to a
//! real node with `reqwest`; [`transport::memory::MemoryTransport`] answers
//! from a closure and is meant for tests.
//!
//! ## Errors
//!
//! A call fails with exactly one of:
//!
//! 1. `Network` when no reply arrived, the status is not 200, the body is
//!    empty, or the response id does not match the request id.
//! 2. `Response` when the node returned an error envelope.
//! 3. `Coding` when the result does not fit the expected type.

pub mod api;
pub mod client;
pub mod error;
pub mod messages;
pub mod requests;
pub mod responses;
pub mod transport;

pub use client::{RequestIds, RpcClient, RpcConfig, DEFAULT_ENDPOINT};
pub use error::{Result, RpcError};
pub use requests::RpcRequest;
pub use responses::{
    Account, AppliedOperation, BlockHeader, BroadcastConfirmation, ChainProperties,
    CommitteeRequest, CommitteeVote, DynamicGlobalProperties, Invite, SignedBlock, Witness,
};
pub use transport::{HttpReply, HttpTransport, Transport};
