//! # VIZ Protocol Testkit
//!
//! Testing utilities for the VIZ protocol client.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed transactions, keys, varints and assets with
//!   their expected encodings
//! - **Generators**: proptest strategies for every operation variant
//! - **Fixtures**: deterministic accounts and an in-memory node
//!
//! ## Golden Vectors
//!
//! ```rust
//! use viz_protocol_testkit::vectors::{verify_transaction_vector, TRANSFER_VECTOR};
//!
//! assert!(verify_transaction_vector(&TRANSFER_VECTOR).is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use viz_protocol_core::{from_wire_bytes, to_wire_bytes};
//! use viz_protocol_testkit::generators::operation;
//!
//! proptest! {
//!     #[test]
//!     fn binary_round_trip(op in operation()) {
//!         let bytes = to_wire_bytes(&op).unwrap();
//!         prop_assert_eq!(from_wire_bytes(&bytes).unwrap(), op);
//!     }
//! }
//! ```
//!
//! ## Mock Node
//!
//! ```rust,no_run
//! use viz_protocol::{Asset, Client, ClientConfig};
//! use viz_protocol_testkit::fixtures::{MockNode, TestFixture};
//!
//! # async fn example() {
//! let alice = TestFixture::new("alice");
//! let node = MockNode::new().with_fixture(&alice);
//! let client = Client::new(node.transport(), ClientConfig::default());
//! client.transfer(&alice.key, "alice", "bob", Asset::viz(1000), "").await.unwrap();
//! assert_eq!(node.broadcasts().len(), 1);
//! # }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, MockNode, TestFixture};
