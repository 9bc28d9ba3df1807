//! Transactions: assembly, binary form, digests and signatures.
//!
//! A transaction moves through three states:
//!
//! 1. [`TransactionBuilder`] collects operations and chain metadata.
//! 2. [`Transaction`] is the validated, unsigned body.
//! 3. [`SignedTransaction`] carries one or more signatures over the digest
//!    `sha256(chain_id || transaction_bytes)`.
//!
//! The digest is computed when the first signature is made and cached; every
//! co-signature signs the same bytes.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use viz_protocol_core::{
    BlockId, ChainId, Digest, PrivateKey, PublicKey, Signature, Timestamp, TransactionId,
    WireDecode, WireDecoder, WireEncode, WireEncoder, WireError,
};

use crate::authority::Extensions;
use crate::error::{Result, TransactionError};
use crate::operation::Operation;

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,

    /// Bytes 4..8 of the reference block id, little-endian.
    pub ref_block_prefix: u32,

    /// The node rejects the transaction after this time.
    pub expiration: Timestamp,

    pub operations: Vec<Operation>,

    /// Always empty for transactions built here.
    #[serde(default)]
    pub extensions: Extensions,
}

impl Transaction {
    /// Point the transaction at a recent block, binding it to that fork.
    pub fn set_reference_block(&mut self, block: &BlockId) {
        self.ref_block_num = block.ref_block_num();
        self.ref_block_prefix = block.prefix();
    }

    /// Canonical bytes, the input to both the id and the signing digest.
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, WireError> {
        let mut enc = WireEncoder::with_capacity(128);
        self.encode(&mut enc)?;
        Ok(enc.into_bytes())
    }

    /// First 20 bytes of SHA-256 over the canonical bytes.
    pub fn id(&self) -> Result<TransactionId> {
        let bytes = self.to_bytes()?;
        Ok(TransactionId::from_digest(&Digest::sha256(&bytes)))
    }

    /// The value signatures commit to: `sha256(chain_id || bytes)`.
    pub fn digest(&self, chain_id: &ChainId) -> Result<Digest> {
        let bytes = self.to_bytes()?;
        Ok(Digest::sha256_parts(&[chain_id.as_bytes(), &bytes]))
    }

    /// Check the rules a node enforces on every transaction.
    pub fn validate(&self) -> Result<()> {
        if self.operations.is_empty() {
            return Err(TransactionError::InvalidTransaction(
                "transaction has no operations".into(),
            ));
        }
        if let Some(op) = self.operations.iter().find(|op| op.is_virtual()) {
            return Err(TransactionError::InvalidTransaction(format!(
                "virtual operation {} cannot be signed",
                op.name()
            )));
        }
        if let Some(op) = self.operations.iter().find(|op| op.is_unknown()) {
            return Err(TransactionError::InvalidTransaction(format!(
                "unknown operation {} cannot be signed",
                op.name()
            )));
        }
        Ok(())
    }

    /// Validate, compute the digest for `chain_id`, and sign with `key`.
    pub fn sign(self, key: &PrivateKey, chain_id: &ChainId) -> Result<SignedTransaction> {
        let mut signed = SignedTransaction::unsigned(self);
        signed.sign(key, chain_id)?;
        Ok(signed)
    }
}

impl WireEncode for Transaction {
    fn encode(&self, enc: &mut WireEncoder) -> std::result::Result<(), WireError> {
        enc.put_u16(self.ref_block_num);
        enc.put_u32(self.ref_block_prefix);
        enc.put(&self.expiration)?;
        enc.put_len(self.operations.len());
        for op in &self.operations {
            if op.is_virtual() {
                return Err(WireError::UnsupportedType(format!(
                    "virtual operation {} in transaction",
                    op.name()
                )));
            }
            op.encode(enc)?;
        }
        enc.put(&self.extensions)
    }
}

impl WireDecode for Transaction {
    /// Decoding stops at the first unknown operation, which holds every byte
    /// after its tag. Later operations and extensions are then not read.
    fn decode(dec: &mut WireDecoder<'_>) -> std::result::Result<Self, WireError> {
        let ref_block_num = dec.get_u16()?;
        let ref_block_prefix = dec.get_u32()?;
        let expiration = dec.get()?;
        let count = dec.get_len()?;
        let mut operations = Vec::with_capacity(count);
        for _ in 0..count {
            let op: Operation = dec.get()?;
            let stop = op.is_unknown();
            operations.push(op);
            if stop {
                return Ok(Self {
                    ref_block_num,
                    ref_block_prefix,
                    expiration,
                    operations,
                    extensions: Extensions::new(),
                });
            }
        }
        Ok(Self {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations,
            extensions: dec.get()?,
        })
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Builder
// ───────────────────────────────────────────────────────────────────────────

/// Builder for unsigned transactions.
///
/// The builder never picks an expiration on its own; [`build`](Self::build)
/// fails until one is set.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    ref_block_num: u16,
    ref_block_prefix: u32,
    expiration: Option<Timestamp>,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference a block by id.
    pub fn reference_block(mut self, block: &BlockId) -> Self {
        self.ref_block_num = block.ref_block_num();
        self.ref_block_prefix = block.prefix();
        self
    }

    /// Set the reference fields directly.
    pub fn ref_block(mut self, num: u16, prefix: u32) -> Self {
        self.ref_block_num = num;
        self.ref_block_prefix = prefix;
        self
    }

    pub fn expiration(mut self, expiration: Timestamp) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Expire `window` after `now`, typically the head block time.
    pub fn expire_after(mut self, now: Timestamp, window: Duration) -> Result<Self> {
        let expiration = now.checked_add(window).ok_or_else(|| {
            TransactionError::InvalidTransaction(format!(
                "expiration {now} + {}s is out of range",
                window.as_secs()
            ))
        })?;
        self.expiration = Some(expiration);
        Ok(self)
    }

    /// Append an operation.
    pub fn operation(mut self, op: impl Into<Operation>) -> Self {
        self.operations.push(op.into());
        self
    }

    pub fn operations(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(ops);
        self
    }

    /// Validate and produce the unsigned transaction.
    pub fn build(self) -> Result<Transaction> {
        let expiration = self.expiration.ok_or_else(|| {
            TransactionError::InvalidTransaction("expiration is not set".into())
        })?;
        let tx = Transaction {
            ref_block_num: self.ref_block_num,
            ref_block_prefix: self.ref_block_prefix,
            expiration,
            operations: self.operations,
            extensions: Extensions::new(),
        };
        tx.validate()?;
        Ok(tx)
    }

    /// Build and sign in one step.
    pub fn sign(self, key: &PrivateKey, chain_id: &ChainId) -> Result<SignedTransaction> {
        self.build()?.sign(key, chain_id)
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Signed transactions
// ───────────────────────────────────────────────────────────────────────────

/// Chain binding captured at first signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SigningContext {
    chain_id: ChainId,
    digest: Digest,
}

/// A transaction plus the signatures authorizing it.
///
/// The body cannot change once wrapped; only signatures can be added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    transaction: Transaction,

    signatures: Vec<Signature>,

    #[serde(skip)]
    signing: Option<SigningContext>,
}

impl SignedTransaction {
    /// Wrap a transaction with no signatures and no chain binding.
    pub fn unsigned(transaction: Transaction) -> Self {
        Self {
            transaction,
            signatures: Vec::new(),
            signing: None,
        }
    }

    /// Reassemble from a body and signatures made elsewhere.
    pub fn from_parts(transaction: Transaction, signatures: Vec<Signature>) -> Self {
        Self {
            transaction,
            signatures,
            signing: None,
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// The cached signing digest, once bound to a chain.
    pub fn digest(&self) -> Option<&Digest> {
        self.signing.as_ref().map(|ctx| &ctx.digest)
    }

    pub fn chain_id(&self) -> Option<&ChainId> {
        self.signing.as_ref().map(|ctx| &ctx.chain_id)
    }

    pub fn id(&self) -> Result<TransactionId> {
        self.transaction.id()
    }

    /// Compute and cache the digest for `chain_id`.
    ///
    /// Binding again to the same chain is a no-op; a different chain is an
    /// error, since existing signatures would no longer match.
    pub fn bind_chain(&mut self, chain_id: &ChainId) -> Result<&Digest> {
        match self.signing {
            Some(ctx) if ctx.chain_id != *chain_id => {
                return Err(TransactionError::InvalidTransaction(format!(
                    "already bound to chain {}",
                    ctx.chain_id
                )))
            }
            Some(_) => {}
            None => {
                self.transaction.validate()?;
                let digest = self.transaction.digest(chain_id)?;
                self.signing = Some(SigningContext {
                    chain_id: *chain_id,
                    digest,
                });
            }
        }
        self.digest().ok_or(TransactionError::NotSigned)
    }

    /// Sign for `chain_id`, binding the chain on first use.
    pub fn sign(&mut self, key: &PrivateKey, chain_id: &ChainId) -> Result<&Signature> {
        self.bind_chain(chain_id)?;
        self.cosign(key)
    }

    /// Add a signature over the cached digest.
    pub fn cosign(&mut self, key: &PrivateKey) -> Result<&Signature> {
        let ctx = self.signing.ok_or(TransactionError::NotSigned)?;
        let signature = key.sign(&ctx.digest)?;
        debug!(
            digest = %ctx.digest,
            signer = %key.public_key(),
            count = self.signatures.len() + 1,
            "signed transaction"
        );
        self.signatures.push(signature);
        self.signatures.last().ok_or(TransactionError::NotSigned)
    }

    /// Recover the key behind each signature, in order.
    pub fn verify_signers(&self, chain_id: &ChainId) -> Result<Vec<PublicKey>> {
        let digest = match self.signing {
            Some(ctx) if ctx.chain_id == *chain_id => ctx.digest,
            _ => self.transaction.digest(chain_id)?,
        };
        self.signatures
            .iter()
            .map(|sig| sig.recover(&digest).map_err(TransactionError::from))
            .collect()
    }

    /// Canonical bytes of the body followed by the signatures.
    pub fn to_bytes(&self) -> std::result::Result<Vec<u8>, WireError> {
        let mut enc = WireEncoder::with_capacity(128 + 65 * self.signatures.len());
        self.encode(&mut enc)?;
        Ok(enc.into_bytes())
    }

    pub fn into_parts(self) -> (Transaction, Vec<Signature>) {
        (self.transaction, self.signatures)
    }
}

impl PartialEq for SignedTransaction {
    fn eq(&self, other: &Self) -> bool {
        self.transaction == other.transaction && self.signatures == other.signatures
    }
}

impl WireEncode for SignedTransaction {
    fn encode(&self, enc: &mut WireEncoder) -> std::result::Result<(), WireError> {
        self.transaction.encode(enc)?;
        enc.put_seq(&self.signatures)
    }
}

impl WireDecode for SignedTransaction {
    fn decode(dec: &mut WireDecoder<'_>) -> std::result::Result<Self, WireError> {
        let transaction: Transaction = dec.get()?;
        let signatures = if dec.is_empty() {
            Vec::new()
        } else {
            dec.get()?
        };
        Ok(Self::from_parts(transaction, signatures))
    }
}
