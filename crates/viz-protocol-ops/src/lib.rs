//! # VIZ Protocol Operations
//!
//! Every operation the VIZ chain defines, plus the transaction types that
//! carry them.
//!
//! ## Overview
//!
//! - [`Operation`] is a closed enum over all supported operations. Each
//!   variant wraps a payload struct from [`ops`]. Tags come from
//!   [`OperationKind`].
//! - [`TransactionBuilder`] assembles operations with a reference block and
//!   expiration into a [`Transaction`].
//! - [`SignedTransaction`] binds the transaction to a chain id and collects
//!   signatures.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use viz_protocol_ops::{ops::Transfer, TransactionBuilder};
//! use viz_protocol_core::{Asset, ChainId, PrivateKey, Timestamp};
//!
//! let key = PrivateKey::from_wif("5J...")?;
//! let signed = TransactionBuilder::new()
//!     .ref_block(12345, 1_234_567_890)
//!     .expiration(Timestamp::from_secs(1_704_067_200))
//!     .operation(Transfer {
//!         from: "alice".into(),
//!         to: "bob".into(),
//!         amount: Asset::viz(1000),
//!         memo: String::new(),
//!     })
//!     .sign(&key, &ChainId::MAINNET)?;
//! ```

pub mod authority;
pub mod error;
pub mod kind;
pub mod operation;
pub mod ops;
pub mod transaction;

pub use authority::{Authority, Beneficiary, ContentExtension, Extensions, FutureExtension};
pub use error::{Result, TransactionError};
pub use kind::OperationKind;
pub use operation::{Operation, UnknownOperation};
pub use transaction::{SignedTransaction, Transaction, TransactionBuilder};
